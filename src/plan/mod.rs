//! Plan engine: declarative what-if edits applied to a graph copy.
//!
//! A [`Plan`] is a user-authored list of add/remove/move operations. The
//! engine applies it to a deep clone of the current graph and hands both
//! snapshots to the diff engine, so a hypothetical change produces exactly
//! the same report shape as a real commit comparison.

mod engine;
mod operation;

pub use engine::{apply_plan, ROOT_SENTINEL_ID};
pub use operation::{synthetic_node_id, Plan, PlanOp};
