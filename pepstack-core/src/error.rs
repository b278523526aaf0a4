//! Error types for the layout engine.

use thiserror::Error;

/// Errors that can occur during a layout pass.
///
/// A not-found peptide is not an error: it is reported as data in the
/// skipped-peptide list and never reaches the splitter or assigner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Configuration fault: surfaced before any computation proceeds.
    #[error("Invalid row width: {0} (must be a positive number of ticks)")]
    InvalidRowWidth(usize),

    /// Internal fault: a segment addressed a row outside the planned count.
    #[error("Segment addressed to row {row}, but only {row_count} rows are planned")]
    RowOutOfRange { row: usize, row_count: usize },

    /// Internal fault: a split chain does not reconstruct its source interval.
    #[error("Split chain for interval {interval_id} covers {actual} residues, expected {expected}")]
    ChainLengthMismatch {
        interval_id: usize,
        expected: usize,
        actual: usize,
    },

    /// Internal fault: a segment survived assignment without a stack slot.
    #[error("Segment of interval {interval_id} was left without a stack slot")]
    UnassignedSegment { interval_id: usize },
}

/// Result type for layout engine operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
