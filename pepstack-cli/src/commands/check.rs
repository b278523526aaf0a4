//! Check command implementation - locate peptides and report coverage
//! diagnostics without computing a layout.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use pepstack_core::{find_peptide, io, Peptide, Protein};

use crate::config::Config;
use crate::error::CliError;

#[derive(Debug, Default, PartialEq, Eq)]
struct ProteinReport {
    found: usize,
    missing: usize,
    duplicates: usize,
}

pub fn execute(
    config: &Config,
    proteins: PathBuf,
    peptides: PathBuf,
    mature_offset: Option<usize>,
) -> Result<()> {
    if !proteins.exists() {
        return Err(CliError::file_not_found(proteins).into());
    }
    if !peptides.exists() {
        return Err(CliError::file_not_found(peptides).into());
    }

    let all_proteins = io::load_proteins(&proteins).context("Failed to load protein table")?;
    let all_peptides = io::load_peptides(&peptides).context("Failed to load peptide table")?;

    if all_proteins.is_empty() {
        return Err(CliError::invalid_format("protein table is empty").into());
    }

    let offset = mature_offset.unwrap_or(config.layout.mature_offset);
    let reports = check_peptides(&all_proteins, &all_peptides, offset);

    println!("{:<12} {:>8} {:>8} {:>10}", "protein", "found", "missing", "duplicate");
    for prot in &all_proteins {
        if let Some(report) = reports.get(&prot.id) {
            println!(
                "{:<12} {:>8} {:>8} {:>10}",
                prot.id, report.found, report.missing, report.duplicates
            );
        }
    }

    let orphans: usize = all_peptides
        .iter()
        .filter(|p| !all_proteins.iter().any(|prot| prot.id == p.protein_id))
        .count();
    if orphans > 0 {
        log::warn!("{} peptide(s) reference proteins absent from the table", orphans);
    }

    Ok(())
}

/// Per-protein found/missing/duplicate counts, locating against the
/// sequence trimmed at the mature offset.
fn check_peptides(
    proteins: &[Protein],
    peptides: &[Peptide],
    mature_offset: usize,
) -> HashMap<String, ProteinReport> {
    let mut reports: HashMap<String, ProteinReport> = HashMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for prot in proteins {
        let sequence = prot.sequence.get(mature_offset..).unwrap_or("");
        let report = reports.entry(prot.id.clone()).or_default();

        for peptide in peptides.iter().filter(|p| p.protein_id == prot.id) {
            if !seen.insert((prot.id.clone(), peptide.sequence.clone())) {
                report.duplicates += 1;
            }
            match find_peptide(sequence, &peptide.sequence) {
                Some(_) => report.found += 1,
                None => report.missing += 1,
            }
        }
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protein(id: &str, sequence: &str) -> Protein {
        Protein {
            id: id.to_string(),
            sequence: sequence.to_string(),
        }
    }

    #[test]
    fn test_counts_found_missing_and_duplicates() {
        let proteins = vec![protein("P1", "MKVLILACLVA")];
        let peptides = vec![
            Peptide::new("P1", "KVL"),
            Peptide::new("P1", "KVL"),
            Peptide::new("P1", "ZZZ"),
        ];
        let reports = check_peptides(&proteins, &peptides, 0);
        assert_eq!(
            reports["P1"],
            ProteinReport {
                found: 2,
                missing: 1,
                duplicates: 1,
            }
        );
    }

    #[test]
    fn test_mature_offset_changes_location_outcome() {
        let proteins = vec![protein("P1", "MKVLILACLVA")];
        let peptides = vec![Peptide::new("P1", "MKV")];

        let at_zero = check_peptides(&proteins, &peptides, 0);
        assert_eq!(at_zero["P1"].found, 1);

        let trimmed = check_peptides(&proteins, &peptides, 3);
        assert_eq!(trimmed["P1"].missing, 1);
    }
}
