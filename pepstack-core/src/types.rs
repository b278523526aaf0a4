use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 0-based position or length on a protein sequence, in residues.
pub type SeqPos = usize;

/// Arbitrary rendering metadata carried alongside a peptide (category,
/// functional class, ...). The engine passes it through unchanged.
pub type Payload = Map<String, Value>;

/// A protein record: identifier plus full residue sequence.
///
/// Accepts the UniProt-style `Entry`/`Sequence` field names used by
/// tabular exports as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protein {
    #[serde(alias = "Entry")]
    pub id: String,
    #[serde(alias = "Sequence")]
    pub sequence: String,
}

/// A peptide match candidate against one protein.
///
/// Any input fields beyond the protein id and the peptide sequence are
/// collected into `payload` and carried through to the output segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peptide {
    #[serde(alias = "proteinID")]
    pub protein_id: String,
    #[serde(alias = "peptide")]
    pub sequence: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Peptide {
    pub fn new<S: Into<String>>(protein_id: S, sequence: S) -> Self {
        Self {
            protein_id: protein_id.into(),
            sequence: sequence.into(),
            payload: Payload::new(),
        }
    }

    pub fn with_payload_entry<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }
}

/// A located peptide match: `[start, start + length)` on the effective
/// protein sequence. Built only for peptides the locator actually found,
/// so `length >= 1` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub id: usize,
    pub start: SeqPos,
    pub length: SeqPos,
    pub payload: Payload,
}

/// The part of an interval that lies within a single row, after
/// splitting against row boundaries. `start` and `length` are row-local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub interval_id: usize,
    pub row: usize,
    pub start: SeqPos,
    pub length: SeqPos,
    pub has_prefix_continuation: bool,
    pub has_suffix_continuation: bool,
    /// Vertical stack slot within the row; `None` until assigned.
    pub slot: Option<usize>,
}

impl Segment {
    /// Exclusive row-local end of this segment.
    pub fn end(&self) -> SeqPos {
        self.start + self.length
    }

    /// Half-open horizontal overlap with another segment in the same row.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// All segments derived from one source interval, ordered from the
/// first (lowest-row) member to the last. The chain is the linkage the
/// stack assigner uses to keep wrapped peptides on one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentChain {
    pub interval_id: usize,
    /// Absolute start of the source interval.
    pub start: SeqPos,
    /// Total length of the source interval.
    pub length: SeqPos,
    pub payload: Payload,
    pub segments: Vec<Segment>,
}

impl SegmentChain {
    /// Sum of member lengths; equals `self.length` when splitting was lossless.
    pub fn split_length(&self) -> SeqPos {
        self.segments.iter().map(|s| s.length).sum()
    }
}

/// One output record for the rendering collaborator. The x-range is
/// row-local and half-open, in sequence ticks; the renderer maps ticks
/// and slots into pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedSegment {
    pub protein_id: String,
    pub row: usize,
    pub x_start: SeqPos,
    pub x_end: SeqPos,
    pub slot: usize,
    pub has_prefix_continuation: bool,
    pub has_suffix_continuation: bool,
    #[serde(default)]
    pub payload: Payload,
}

/// A peptide the locator could not find in its protein sequence.
/// Reported, never laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPeptide {
    pub protein_id: String,
    pub peptide: String,
}

/// Result of one layout pass over a single protein.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinLayout {
    pub protein_id: String,
    pub row_width: usize,
    pub row_count: usize,
    /// Number of stack slots used per row, indexed by row.
    pub slots_used: Vec<usize>,
    pub segments: Vec<PositionedSegment>,
    pub skipped: Vec<SkippedPeptide>,
}
