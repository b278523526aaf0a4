//! Tabular ingestion for pepstack.
//!
//! Proteins and peptides arrive either as JSON arrays (the desktop
//! app's `proteins.json` / `peptides.json` exports) or as TSV tables
//! with a header line. Gzipped TSV is read transparently.

pub mod json;
pub mod tsv;

pub use tsv::{TsvError, TsvParser};

use crate::types::{Peptide, Protein};
use anyhow::{bail, Result};
use std::path::Path;

/// Load proteins from a file, dispatching on the extension.
pub fn load_proteins<P: AsRef<Path>>(path: P) -> Result<Vec<Protein>> {
    let name = path.as_ref().to_string_lossy().to_lowercase();
    if name.ends_with(".json") {
        return json::read_proteins(path);
    }
    if name.ends_with(".tsv") || name.ends_with(".tsv.gz") || name.ends_with(".txt") {
        return Ok(TsvParser::parse_proteins_file(path)?);
    }
    bail!("Unsupported protein file format: {}", name);
}

/// Load peptides from a file, dispatching on the extension.
pub fn load_peptides<P: AsRef<Path>>(path: P) -> Result<Vec<Peptide>> {
    let name = path.as_ref().to_string_lossy().to_lowercase();
    if name.ends_with(".json") {
        return json::read_peptides(path);
    }
    if name.ends_with(".tsv") || name.ends_with(".tsv.gz") || name.ends_with(".txt") {
        return Ok(TsvParser::parse_peptides_file(path)?);
    }
    bail!("Unsupported peptide file format: {}", name);
}
