//! JSON ingestion for protein and peptide arrays.

use crate::types::{Peptide, Protein};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a JSON array of proteins. UniProt-style `Entry`/`Sequence`
/// field names are accepted alongside `id`/`sequence`.
pub fn read_proteins<P: AsRef<Path>>(path: P) -> Result<Vec<Protein>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open protein file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse protein JSON: {}", path.display()))
}

/// Read a JSON array of peptides. Fields beyond the protein id and the
/// peptide sequence land in each peptide's payload.
pub fn read_peptides<P: AsRef<Path>>(path: P) -> Result<Vec<Peptide>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open peptide file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse peptide JSON: {}", path.display()))
}
