//! Layout coordination: locate, split, and stack peptides per protein.
//!
//! A layout pass is a pure computation: every call rebuilds row
//! occupancy from empty, so parameter changes (protein selection, row
//! width) simply mean calling again. Nothing is cached between calls.

use crate::error::{LayoutError, LayoutResult};
use crate::locate::find_peptide;
use crate::rows::RowPlan;
use crate::split::split_interval;
use crate::stack::StackAssigner;
use crate::types::{
    Interval, Peptide, PositionedSegment, Protein, ProteinLayout, SkippedPeptide,
};
use serde::{Deserialize, Serialize};

/// Parameters for one layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Maximum ticks per display row.
    pub row_width: usize,
    /// Residues to skip at the start of every sequence before locating
    /// peptides (mature protein offset). All output coordinates are
    /// relative to the trimmed sequence.
    pub mature_offset: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            row_width: 60,
            mature_offset: 0,
        }
    }
}

/// Lay out every peptide of `protein` on a wrapped row grid.
///
/// Peptides belonging to other proteins are ignored; peptides absent
/// from the sequence go to the skipped report instead of the output.
/// Fails fast on a zero row width and on any internal consistency
/// fault, returning no partial geometry.
pub fn layout(
    protein: &Protein,
    peptides: &[Peptide],
    params: &LayoutParams,
) -> LayoutResult<ProteinLayout> {
    let plan = RowPlan::new(params.row_width)?;
    let sequence = effective_sequence(protein, params.mature_offset);
    let row_count = plan.row_count(sequence.len());

    let mut skipped = Vec::new();
    let mut chains = Vec::new();

    for peptide in peptides.iter().filter(|p| p.protein_id == protein.id) {
        let start = match find_peptide(sequence, &peptide.sequence) {
            Some(start) => start,
            None => {
                log::warn!(
                    "peptide '{}' not found in protein {}, skipping",
                    peptide.sequence,
                    protein.id
                );
                skipped.push(SkippedPeptide {
                    protein_id: protein.id.clone(),
                    peptide: peptide.sequence.clone(),
                });
                continue;
            }
        };

        let interval = Interval {
            id: chains.len(),
            start,
            length: peptide.sequence.len(),
            payload: peptide.payload.clone(),
        };
        let chain = split_interval(&interval, &plan);
        if chain.split_length() != interval.length {
            return Err(LayoutError::ChainLengthMismatch {
                interval_id: interval.id,
                expected: interval.length,
                actual: chain.split_length(),
            });
        }
        chains.push(chain);
    }

    let mut assigner = StackAssigner::new(row_count);
    assigner.assign(&mut chains)?;

    let mut segments = Vec::new();
    for chain in &chains {
        for seg in &chain.segments {
            let slot = seg.slot.ok_or(LayoutError::UnassignedSegment {
                interval_id: chain.interval_id,
            })?;
            segments.push(PositionedSegment {
                protein_id: protein.id.clone(),
                row: seg.row,
                x_start: seg.start,
                x_end: seg.end(),
                slot,
                has_prefix_continuation: seg.has_prefix_continuation,
                has_suffix_continuation: seg.has_suffix_continuation,
                payload: chain.payload.clone(),
            });
        }
    }

    log::debug!(
        "protein {}: {} segments over {} rows, {} peptides skipped",
        protein.id,
        segments.len(),
        row_count,
        skipped.len()
    );

    Ok(ProteinLayout {
        protein_id: protein.id.clone(),
        row_width: params.row_width,
        row_count,
        slots_used: assigner.slots_used(),
        segments,
        skipped,
    })
}

/// Sequence visible to the locator after trimming the mature offset.
/// An offset at or past the end yields an empty sequence, so every
/// peptide lands in the skipped report.
fn effective_sequence(protein: &Protein, mature_offset: usize) -> &str {
    protein.sequence.get(mature_offset..).unwrap_or("")
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
    fn test_zero_row_width_fails_before_any_work() {
        let params = LayoutParams {
            row_width: 0,
            ..Default::default()
        };
        let err = layout(&protein("P1", "MKVL"), &[], &params).unwrap_err();
        assert_eq!(err, LayoutError::InvalidRowWidth(0));
    }

    #[test]
    fn test_peptides_of_other_proteins_are_ignored() {
        let prot = protein("P1", "MKVLILACLVA");
        let peptides = vec![Peptide::new("P2", "MKV")];
        let result = layout(&prot, &peptides, &LayoutParams::default()).unwrap();
        assert!(result.segments.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_absent_peptide_goes_to_skipped_report() {
        let prot = protein("P1", "MKVLILACLVA");
        let peptides = vec![Peptide::new("P1", "WWW"), Peptide::new("P1", "KVL")];
        let result = layout(&prot, &peptides, &LayoutParams::default()).unwrap();
        assert_eq!(result.segments.len(), 1);
        assert_eq!(
            result.skipped,
            vec![SkippedPeptide {
                protein_id: "P1".to_string(),
                peptide: "WWW".to_string(),
            }]
        );
    }

    #[test]
    fn test_mature_offset_shifts_coordinates() {
        // With the first 3 residues trimmed, "LIL" starts at 0.
        let prot = protein("P1", "MKVLILACLVA");
        let peptides = vec![Peptide::new("P1", "LIL")];
        let params = LayoutParams {
            row_width: 10,
            mature_offset: 3,
        };
        let result = layout(&prot, &peptides, &params).unwrap();
        assert_eq!(result.segments[0].x_start, 0);
    }

    #[test]
    fn test_mature_offset_past_end_skips_everything() {
        let prot = protein("P1", "MKVL");
        let peptides = vec![Peptide::new("P1", "MKVL")];
        let params = LayoutParams {
            row_width: 10,
            mature_offset: 100,
        };
        let result = layout(&prot, &peptides, &params).unwrap();
        assert_eq!(result.row_count, 0);
        assert!(result.segments.is_empty());
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn test_payload_passes_through_unchanged() {
        let prot = protein("P1", "MKVLILACLVA");
        let peptides = vec![Peptide::new("P1", "KVL")
            .with_payload_entry("function", serde_json::json!("Antioxidant"))];
        let result = layout(&prot, &peptides, &LayoutParams::default()).unwrap();
        assert_eq!(
            result.segments[0].payload["function"],
            serde_json::json!("Antioxidant")
        );
    }
}
