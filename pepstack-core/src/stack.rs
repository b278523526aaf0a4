//! Vertical stack slot assignment.
//!
//! Chains are processed in a deterministic global order: ascending
//! source start, longer intervals first on a shared start. Processing
//! long peptides first keeps short ones from claiming slot 0 and
//! pushing long ones into deep stacks. Each chain takes the lowest
//! slot that is free across every row it touches, so a wrapped peptide
//! reads as one continuous line.

use crate::error::{LayoutError, LayoutResult};
use crate::types::SegmentChain;

/// Per-row record of occupied stack slots. Slot `k` holds the
/// half-open spans already placed at that height within the row.
/// Rebuilt from empty for every layout pass.
#[derive(Debug, Default)]
struct RowOccupancy {
    slots: Vec<Vec<(usize, usize)>>,
}

impl RowOccupancy {
    fn slot_is_free(&self, slot: usize, start: usize, end: usize) -> bool {
        match self.slots.get(slot) {
            Some(spans) => spans.iter().all(|&(s, e)| end <= s || e <= start),
            None => true,
        }
    }

    fn occupy(&mut self, slot: usize, start: usize, end: usize) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, Vec::new);
        }
        self.slots[slot].push((start, end));
    }

    fn used_slots(&self) -> usize {
        self.slots.len()
    }
}

/// Greedy single-pass slot assigner over one layout pass's rows.
#[derive(Debug)]
pub struct StackAssigner {
    occupancy: Vec<RowOccupancy>,
}

impl StackAssigner {
    pub fn new(row_count: usize) -> Self {
        Self {
            occupancy: (0..row_count).map(|_| RowOccupancy::default()).collect(),
        }
    }

    /// Assign a stack slot to every chain, mutating member segments.
    ///
    /// Ties on `(start, length)` keep the input order (the sort is
    /// stable), so identical inputs always yield identical slots. A
    /// member addressed to an unplanned row is an internal consistency
    /// fault and aborts the pass.
    pub fn assign(&mut self, chains: &mut [SegmentChain]) -> LayoutResult<()> {
        let mut order: Vec<usize> = (0..chains.len()).collect();
        order.sort_by(|&a, &b| {
            chains[a]
                .start
                .cmp(&chains[b].start)
                .then(chains[b].length.cmp(&chains[a].length))
        });

        for index in order {
            let chain = &mut chains[index];
            for seg in &chain.segments {
                if seg.row >= self.occupancy.len() {
                    return Err(LayoutError::RowOutOfRange {
                        row: seg.row,
                        row_count: self.occupancy.len(),
                    });
                }
            }

            let slot = self.lowest_free_slot(chain);
            for seg in &mut chain.segments {
                seg.slot = Some(slot);
                self.occupancy[seg.row].occupy(slot, seg.start, seg.end());
            }
        }
        Ok(())
    }

    /// Lowest slot free in every row the chain touches. Terminates:
    /// the slot above all occupied ones is always free.
    fn lowest_free_slot(&self, chain: &SegmentChain) -> usize {
        let mut slot = 0;
        loop {
            let free = chain
                .segments
                .iter()
                .all(|seg| self.occupancy[seg.row].slot_is_free(slot, seg.start, seg.end()));
            if free {
                return slot;
            }
            slot += 1;
        }
    }

    /// Slots used per row, indexed by row.
    pub fn slots_used(&self) -> Vec<usize> {
        self.occupancy.iter().map(|o| o.used_slots()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RowPlan;
    use crate::split::split_interval;
    use crate::types::{Interval, Payload};

    fn chain(id: usize, start: usize, length: usize, width: usize) -> SegmentChain {
        let interval = Interval {
            id,
            start,
            length,
            payload: Payload::new(),
        };
        split_interval(&interval, &RowPlan::new(width).unwrap())
    }

    fn slots(chains: &[SegmentChain]) -> Vec<usize> {
        chains
            .iter()
            .map(|c| c.segments[0].slot.unwrap())
            .collect()
    }

    #[test]
    fn test_disjoint_segments_share_slot_zero() {
        let mut chains = vec![chain(0, 0, 4, 20), chain(1, 10, 4, 20)];
        StackAssigner::new(1).assign(&mut chains).unwrap();
        assert_eq!(slots(&chains), vec![0, 0]);
    }

    #[test]
    fn test_longer_interval_wins_shared_start() {
        // Lengths 4 and 8 at start 0: the longer one gets slot 0 even
        // though it comes later in the input.
        let mut chains = vec![chain(0, 0, 4, 20), chain(1, 0, 8, 20)];
        StackAssigner::new(1).assign(&mut chains).unwrap();
        assert_eq!(slots(&chains), vec![1, 0]);
    }

    #[test]
    fn test_overlap_forces_next_slot() {
        let mut chains = vec![chain(0, 0, 6, 20), chain(1, 4, 6, 20), chain(2, 12, 4, 20)];
        StackAssigner::new(1).assign(&mut chains).unwrap();
        assert_eq!(slots(&chains), vec![0, 1, 0]);
    }

    #[test]
    fn test_wrapped_chain_holds_one_slot_across_rows() {
        // Chain 0 wraps rows 0->1; chain 1 overlaps only its tail row.
        let mut chains = vec![chain(0, 7, 6, 10), chain(1, 10, 4, 10)];
        let mut assigner = StackAssigner::new(2);
        assigner.assign(&mut chains).unwrap();

        let wrapped: Vec<usize> = chains[0]
            .segments
            .iter()
            .map(|s| s.slot.unwrap())
            .collect();
        assert_eq!(wrapped, vec![0, 0]);
        assert_eq!(chains[1].segments[0].slot, Some(1));
    }

    #[test]
    fn test_slot_blocked_in_any_touched_row_blocks_whole_chain() {
        // Chain 2 wraps rows 1..=2 and is free in row 2, but collides
        // with chain 1 in row 1, so both of its members move up a slot.
        let mut chains = vec![
            chain(0, 8, 6, 10),  // rows 0..=1, slot 0
            chain(1, 14, 4, 10), // row 1, local 4..8, slot 0
            chain(2, 15, 8, 10), // row 1 local 5..10 + row 2 local 0..3
        ];
        StackAssigner::new(3).assign(&mut chains).unwrap();
        assert_eq!(chains[0].segments[1].slot, Some(0));
        assert_eq!(chains[1].segments[0].slot, Some(0));
        assert_eq!(chains[2].segments[0].slot, Some(1));
        assert_eq!(chains[2].segments[1].slot, Some(1));
    }

    #[test]
    fn test_row_out_of_range_is_fatal() {
        let mut chains = vec![chain(0, 25, 4, 10)]; // lands in row 2
        let err = StackAssigner::new(2).assign(&mut chains).unwrap_err();
        assert_eq!(
            err,
            LayoutError::RowOutOfRange {
                row: 2,
                row_count: 2
            }
        );
    }

    #[test]
    fn test_slots_used_per_row() {
        let mut chains = vec![chain(0, 0, 6, 10), chain(1, 2, 6, 10), chain(2, 12, 4, 10)];
        let mut assigner = StackAssigner::new(2);
        assigner.assign(&mut chains).unwrap();
        assert_eq!(assigner.slots_used(), vec![2, 1]);
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let build = || {
            vec![
                chain(0, 0, 8, 10),
                chain(1, 0, 8, 10),
                chain(2, 3, 5, 10),
                chain(3, 11, 6, 10),
            ]
        };
        let mut first = build();
        let mut second = build();
        StackAssigner::new(2).assign(&mut first).unwrap();
        StackAssigner::new(2).assign(&mut second).unwrap();
        assert_eq!(first, second);
    }
}
