//! Graph data model: nodes, edges, snapshots, and per-call indexes.

mod graph;
mod index;
mod node;

pub use graph::{Edge, EdgeKind, Graph};
pub use index::{GraphIndex, SignatureEntry};
pub use node::{Layer, Node, NodeId, NodeKind, DIFF_VISIBLE_MIN_LEVEL};
