//! The architecture graph: nodes, typed edges, and snapshot hashing.

use super::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

/// Directed relationship types between graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum EdgeKind {
    Contains,
    Imports,
    Calls,
    InheritsFrom,
    DependsOn,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Contains => "contains",
            Self::Imports => "imports",
            Self::Calls => "calls",
            Self::InheritsFrom => "inherits_from",
            Self::DependsOn => "depends_on",
        };
        write!(f, "{s}")
    }
}

const fn default_weight() -> u64 {
    1
}

/// A directed, typed, weighted edge.
///
/// Identity for diffing purposes is the `(from, to, type)` tuple; weight is
/// carried but never part of edge identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default = "default_weight")]
    pub weight: u64,
}

impl Edge {
    /// Create an edge with the default weight of 1.
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            weight: 1,
        }
    }

    /// Set the edge weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: u64) -> Self {
        self.weight = weight;
        self
    }

    /// The `(from, to, type)` identity tuple used for edge matching.
    #[must_use]
    pub fn key(&self) -> (NodeId, NodeId, EdgeKind) {
        (self.from.clone(), self.to.clone(), self.kind)
    }
}

/// One immutable snapshot of the codebase as a typed property graph.
///
/// The wire shape matches the analyzer's output: plain node and edge lists.
/// `Clone` produces a fully independent deep copy (owned strings and vectors,
/// no shared state), which is the isolation boundary the plan engine relies
/// on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Append an edge.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Look up a node by id (linear scan; engines use a [`GraphIndex`]
    /// instead of calling this in a loop).
    ///
    /// [`GraphIndex`]: super::GraphIndex
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Total node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total edge count.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Order-insensitive content hash of the snapshot.
    ///
    /// Two graphs with equal hashes are treated as identical by the diff
    /// engine's fast path. Nodes are hashed in id order and edges in key
    /// order so that input ordering never affects the result.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut input = Vec::new();

        let mut node_refs: Vec<&Node> = self.nodes.iter().collect();
        node_refs.sort_by(|a, b| a.id.cmp(&b.id));
        for node in node_refs {
            input.extend(node.id.value().as_bytes());
            input.push(0);
            input.extend(node.kind.to_string().as_bytes());
            input.push(0);
            input.extend(node.name.as_bytes());
            input.push(0);
            input.extend(node.file_path.as_deref().unwrap_or("").as_bytes());
            input.push(0);
            input.extend(node.lines_of_code.unwrap_or(0).to_le_bytes());
            input.extend(node.export_count.unwrap_or(0).to_le_bytes());
            input.push(node.abstraction_level);
            input.extend(
                node.parent
                    .as_ref()
                    .map(NodeId::value)
                    .unwrap_or("")
                    .as_bytes(),
            );
            input.push(0);
        }

        let mut edge_refs: Vec<&Edge> = self.edges.iter().collect();
        edge_refs.sort_by_key(|e| (e.from.clone(), e.to.clone(), e.kind, e.weight));
        for edge in edge_refs {
            input.extend(edge.from.value().as_bytes());
            input.push(0);
            input.extend(edge.to.value().as_bytes());
            input.push(0);
            input.extend(edge.kind.to_string().as_bytes());
            input.push(0);
            input.extend(edge.weight.to_le_bytes());
        }

        xxh3_64(&input)
    }
}
