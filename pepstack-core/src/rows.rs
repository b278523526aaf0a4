//! Row planning: partitioning a sequence into fixed-width display rows.

use crate::error::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};

/// Partition of a 1-D sequence into consecutive rows of `width` ticks.
///
/// Rows are implicit: nothing is allocated per row here, the plan only
/// maps absolute positions into `(row, offset)` coordinates. The last
/// row may be shorter than `width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPlan {
    width: usize,
}

/// Position of an absolute sequence tick within the row grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCoord {
    pub row: usize,
    pub offset: usize,
}

impl RowPlan {
    /// Create a plan with the given row width. A zero width is a
    /// configuration fault and is rejected before any layout work.
    pub fn new(width: usize) -> LayoutResult<Self> {
        if width == 0 {
            return Err(LayoutError::InvalidRowWidth(width));
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows needed to display `sequence_len` ticks.
    pub fn row_count(&self, sequence_len: usize) -> usize {
        (sequence_len + self.width - 1) / self.width
    }

    /// Map an absolute position to its row and row-local offset.
    pub fn locate(&self, position: usize) -> RowCoord {
        RowCoord {
            row: position / self.width,
            offset: position % self.width,
        }
    }

    /// Ticks remaining in the row that contains `position`, counting
    /// `position` itself. Always at least 1.
    pub fn space_in_row(&self, position: usize) -> usize {
        self.width - position % self.width
    }
}
