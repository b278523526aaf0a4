//! Layout command implementation - compute positioned segments and emit JSON

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use pepstack_core::{io, layout, LayoutParams, Peptide, ProteinLayout};

use crate::config::Config;
use crate::error::CliError;

/// Top-level JSON document handed to the rendering frontend.
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub engine_version: String,
    pub row_width: usize,
    pub mature_offset: usize,
    /// Distinct functional classes seen across all laid-out peptides,
    /// sorted; the frontend builds its legend from this.
    pub functions: Vec<String>,
    pub proteins: Vec<ProteinLayout>,
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &Config,
    proteins: PathBuf,
    peptides: PathBuf,
    protein: Option<String>,
    row_width: Option<usize>,
    mature_offset: Option<usize>,
    out: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    log::info!("Protein table: {}", proteins.display());
    log::info!("Peptide table: {}", peptides.display());

    if !proteins.exists() {
        return Err(CliError::file_not_found(proteins).into());
    }
    if !peptides.exists() {
        return Err(CliError::file_not_found(peptides).into());
    }

    let all_proteins = io::load_proteins(&proteins).context("Failed to load protein table")?;
    let all_peptides = io::load_peptides(&peptides).context("Failed to load peptide table")?;
    log::info!(
        "Loaded {} proteins and {} peptides",
        all_proteins.len(),
        all_peptides.len()
    );

    if all_proteins.is_empty() {
        return Err(CliError::invalid_format("protein table is empty").into());
    }

    let params = LayoutParams {
        row_width: row_width.unwrap_or(config.layout.row_width),
        mature_offset: mature_offset.unwrap_or(config.layout.mature_offset),
    };

    let selected: Vec<_> = match &protein {
        Some(id) => {
            let found = all_proteins
                .iter()
                .find(|p| &p.id == id)
                .ok_or_else(|| CliError::unknown_protein(id.clone()))?;
            vec![found]
        }
        None => all_proteins
            .iter()
            .filter(|p| all_peptides.iter().any(|pep| pep.protein_id == p.id))
            .collect(),
    };
    log::info!("Laying out {} protein(s), row width {}", selected.len(), params.row_width);

    let mut layouts = Vec::new();
    for prot in selected {
        let result = layout(prot, &all_peptides, &params)
            .with_context(|| format!("Layout failed for protein {}", prot.id))?;
        log::info!(
            "{}: {} segments, {} rows, {} skipped",
            result.protein_id,
            result.segments.len(),
            result.row_count,
            result.skipped.len()
        );
        layouts.push(result);
    }

    let report = LayoutReport {
        engine_version: pepstack_core::VERSION.to_string(),
        row_width: params.row_width,
        mature_offset: params.mature_offset,
        functions: function_census(&all_peptides),
        proteins: layouts,
    };

    let json = if pretty || config.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            log::info!("Layout written to: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Distinct `function` payload values, sorted. Peptides without one are
/// ignored; the frontend maps unknown classes to its fallback color.
fn function_census(peptides: &[Peptide]) -> Vec<String> {
    let mut functions: Vec<String> = peptides
        .iter()
        .filter_map(|p| match p.payload.get("function") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
        .collect();
    functions.sort();
    functions.dedup();
    functions
}
