//! Structural diff engine for architecture graphs.
//!
//! [`compute_diff`] compares two snapshots and classifies every
//! diff-visible node as added, removed, moved, or modified, plus every
//! visible edge as added or removed. The computation is pure: no global
//! state, no mutation of either input, id-sorted output on every call.
//!
//! # Example
//!
//! ```ignore
//! use codegraph_tools::diff::{compute_diff, DiffMeta};
//!
//! let report = compute_diff(&before, &after, DiffMeta::commits("main", "dev"))?;
//! println!("{} nodes added", report.summary.added_nodes);
//! ```

mod engine;
mod moves;
mod result;

pub use engine::compute_diff;
pub use moves::{resolve_moves, MoveOutcome, MovePair, MoveResolution};
pub use result::{
    DiffMeta, DiffReport, DiffSummary, EdgeRecord, FieldChanges, FieldDelta, ModifiedNode,
    MovedNode, NodeRecord,
};
