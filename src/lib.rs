//! **Structural diff and change-planning for codebase architecture graphs.**
//!
//! `codegraph-tools` takes typed property graphs of a codebase (directories,
//! files, and synthetic aggregates connected by `contains`/`imports`/`calls`
//! edges) and answers two questions precisely:
//!
//! - *What changed structurally between two versions of this graph?*
//!   [`diff::compute_diff`] classifies every node and edge into
//!   added/removed/moved/modified with stable, reproducible ordering.
//! - *What would a hypothetical set of architectural edits do?*
//!   [`plan::apply_plan`] applies a declarative edit plan to a working copy
//!   and diffs it against the original, emitting the same report shape.
//!
//! The engines are pure functions over in-memory snapshots: no I/O, no
//! global state, no mutation of their inputs. Classification is
//! conservative: a rename is reported as a move only when the pairing is
//! unambiguous, and anything else degrades to plain add/remove rather than
//! a guess.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the graph snapshot ([`Graph`], [`Node`], [`Edge`]), the
//!   C1..C4 layer mapping, and the per-call [`GraphIndex`].
//! - **[`diff`]**: the diff engine and the [`DiffReport`] wire format.
//! - **[`plan`]**: declarative [`Plan`] documents and their application.
//! - **[`reports`]**: JSON emission shared by both producers.
//! - **[`error`]**: the [`GraphDiffError`] hierarchy.
//!
//! ## Diffing two snapshots
//!
//! ```
//! use codegraph_tools::{compute_diff, DiffMeta, Graph, Node, NodeKind};
//!
//! fn main() -> codegraph_tools::Result<()> {
//!     let mut before = Graph::new();
//!     before.add_node(
//!         Node::new("file:auth.py", NodeKind::File, "auth.py")
//!             .with_level(1)
//!             .with_lines_of_code(50),
//!     );
//!     let mut after = Graph::new();
//!     after.add_node(
//!         Node::new("file:auth.py", NodeKind::File, "auth.py")
//!             .with_level(1)
//!             .with_lines_of_code(80),
//!     );
//!
//!     let report = compute_diff(&before, &after, DiffMeta::commits("v1", "v2"))?;
//!     assert_eq!(report.summary.modified_nodes, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Applying a plan
//!
//! ```
//! use codegraph_tools::{apply_plan, Graph, Node, NodeKind, Plan};
//!
//! fn main() -> codegraph_tools::Result<()> {
//!     let mut graph = Graph::new();
//!     graph.add_node(Node::new("dir:svc", NodeKind::Directory, "svc").with_level(2));
//!
//!     let plan = Plan::from_json_str(
//!         r#"{"name": "teardown", "operations": [{"op": "remove", "id": "dir:svc"}]}"#,
//!     )?;
//!     let report = apply_plan(&graph, &plan)?;
//!     assert_eq!(report.summary.removed_nodes, 1);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]

pub mod diff;
pub mod error;
pub mod model;
pub mod plan;
pub mod reports;

// Re-export main types for convenience
pub use diff::{
    compute_diff, DiffMeta, DiffReport, DiffSummary, EdgeRecord, FieldChanges, FieldDelta,
    ModifiedNode, MoveOutcome, MovedNode, NodeRecord,
};
pub use error::{GraphDiffError, MalformedGraphKind, Result, ValidationErrorKind};
pub use model::{
    Edge, EdgeKind, Graph, GraphIndex, Layer, Node, NodeId, NodeKind, DIFF_VISIBLE_MIN_LEVEL,
};
pub use plan::{apply_plan, synthetic_node_id, Plan, PlanOp, ROOT_SENTINEL_ID};
pub use reports::JsonReporter;
