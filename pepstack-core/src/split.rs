//! Interval splitting against row boundaries.
//!
//! An interval that overflows its starting row is cut into a head
//! segment filling the rest of that row and a remainder begun at the
//! next row start, repeatedly until the remainder fits. The boundary
//! tick is half-open: the head owns ticks up to the row end exclusive,
//! the tail starts at the next row's first tick, and no residue is
//! shared or dropped.

use crate::rows::RowPlan;
use crate::types::{Interval, Segment, SegmentChain};

/// Split one located interval into its ordered segment chain.
///
/// The first member carries no prefix continuation and the last no
/// suffix continuation; every cut sets the suffix flag on the segment
/// before it and the prefix flag on the segment after it. Terminates
/// because each step consumes at least one tick.
pub fn split_interval(interval: &Interval, plan: &RowPlan) -> SegmentChain {
    let mut segments = Vec::new();
    let mut position = interval.start;
    let mut remaining = interval.length;

    while remaining > 0 {
        let coord = plan.locate(position);
        let space = plan.space_in_row(position);
        let taken = remaining.min(space);

        segments.push(Segment {
            interval_id: interval.id,
            row: coord.row,
            start: coord.offset,
            length: taken,
            has_prefix_continuation: !segments.is_empty(),
            has_suffix_continuation: remaining > taken,
            slot: None,
        });

        position += taken;
        remaining -= taken;
    }

    SegmentChain {
        interval_id: interval.id,
        start: interval.start,
        length: interval.length,
        payload: interval.payload.clone(),
        segments,
    }
}
