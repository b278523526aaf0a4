//! pepstack core library
//!
//! Layout engine for rendering peptide coverage as stacked horizontal
//! lines over a wrapped, multi-row protein sequence axis. The engine
//! locates peptides, splits their intervals against row boundaries,
//! and assigns collision-free vertical stack slots; drawing is left to
//! an external rendering collaborator that consumes the positioned
//! segments.

pub mod error;
pub mod io;
pub mod layout;
pub mod locate;
pub mod rows;
pub mod split;
pub mod stack;
pub mod types;

// Re-export the layout entry point and commonly used types
pub use error::{LayoutError, LayoutResult};
pub use layout::{layout, LayoutParams};
pub use locate::find_peptide;
pub use rows::{RowCoord, RowPlan};
pub use split::split_interval;
pub use stack::StackAssigner;
pub use types::{
    Payload, Peptide, PositionedSegment, Protein, ProteinLayout, Segment, SegmentChain,
    SkippedPeptide,
};

/// Version information for the pepstack core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
