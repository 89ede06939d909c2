//! Diff report structures: the one wire format the system is built around.
//!
//! A [`DiffReport`] is assembled exactly once per diff invocation and is
//! immutable afterwards. The summary is derived from the collection lengths
//! inside [`DiffReport::assemble`]; there is no other computation path, so
//! the counts can never disagree with the detail lists.

use crate::model::{Edge, EdgeKind, Node, NodeId, NodeKind, SignatureEntry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Provenance of a diff report: which producer created the two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DiffMeta {
    /// Two real git snapshots, labeled with caller-supplied refs.
    Commits { ref_a: String, ref_b: String },
    /// One real graph plus one hypothetical edit of it.
    Plan { plan_name: String },
}

impl DiffMeta {
    /// Meta for a commit-to-commit comparison.
    pub fn commits(ref_a: impl Into<String>, ref_b: impl Into<String>) -> Self {
        Self::Commits {
            ref_a: ref_a.into(),
            ref_b: ref_b.into(),
        }
    }

    /// Meta for a plan application.
    pub fn plan(plan_name: impl Into<String>) -> Self {
        Self::Plan {
            plan_name: plan_name.into(),
        }
    }
}

/// Summary statistics, always equal to the detail collection lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added_nodes: usize,
    pub removed_nodes: usize,
    pub moved_nodes: usize,
    pub modified_nodes: usize,
    pub added_edges: usize,
    pub removed_edges: usize,
}

impl DiffSummary {
    /// Total number of reported changes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.added_nodes
            + self.removed_nodes
            + self.moved_nodes
            + self.modified_nodes
            + self.added_edges
            + self.removed_edges
    }
}

/// Reported view of one node in the added/removed collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub abstraction_level: u8,
    pub lines_of_code: u64,
}

impl NodeRecord {
    /// Summarize a node for the report.
    #[must_use]
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            name: node.name.clone(),
            file_path: node.file_path.clone(),
            abstraction_level: node.abstraction_level,
            lines_of_code: node.lines_of_code.unwrap_or(0),
        }
    }
}

/// A node that kept its name and kind but changed id (rename/relocation).
///
/// Reports the new node's data; the old side is carried as `old_id` and
/// `old_file_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovedNode {
    pub id: NodeId,
    pub old_id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_file_path: Option<String>,
    pub abstraction_level: u8,
}

impl MovedNode {
    /// Build a move entry from the removed (old) and added (new) versions.
    #[must_use]
    pub fn from_pair(old: &Node, new: &Node) -> Self {
        Self {
            id: new.id.clone(),
            old_id: old.id.clone(),
            kind: new.kind,
            name: new.name.clone(),
            old_file_path: old.file_path.clone(),
            new_file_path: new.file_path.clone(),
            abstraction_level: new.abstraction_level,
        }
    }
}

/// `[old, new]` pair for one tracked field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDelta(pub Value, pub Value);

impl FieldDelta {
    /// Build a delta from two serializable values.
    pub fn of(old: impl Into<Value>, new: impl Into<Value>) -> Self {
        Self(old.into(), new.into())
    }

    /// Render an adjacency signature as a sorted JSON array for reporting.
    #[must_use]
    pub fn signature_value(signature: &BTreeSet<SignatureEntry>) -> Value {
        Value::Array(
            signature
                .iter()
                .map(|(kind, other, weight)| json!([kind.to_string(), other.value(), weight]))
                .collect(),
        )
    }
}

/// Ordered map of tracked field name → `[old, new]`.
pub type FieldChanges = BTreeMap<String, FieldDelta>;

/// A node present in both snapshots whose tracked fields differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedNode {
    #[serde(flatten)]
    pub node: NodeRecord,
    /// Only fields that actually differ appear here.
    pub changes: FieldChanges,
}

/// Reported view of one edge, identified by its `(from, to, type)` tuple.
///
/// Weight deltas are not reported on edges; they surface as modifications
/// of the endpoint nodes instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl EdgeRecord {
    /// Summarize an edge for the report.
    #[must_use]
    pub fn from_edge(edge: &Edge) -> Self {
        Self {
            from: edge.from.clone(),
            to: edge.to.clone(),
            kind: edge.kind,
        }
    }
}

/// Complete result of one diff invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct DiffReport {
    pub meta: DiffMeta,
    pub summary: DiffSummary,
    pub added_nodes: Vec<NodeRecord>,
    pub removed_nodes: Vec<NodeRecord>,
    pub moved_nodes: Vec<MovedNode>,
    pub modified_nodes: Vec<ModifiedNode>,
    pub added_edges: Vec<EdgeRecord>,
    pub removed_edges: Vec<EdgeRecord>,
}

impl DiffReport {
    /// Assemble a report from classified collections.
    ///
    /// Sorts every collection by id (moves by the new id, edges by their
    /// identity tuple) and derives the summary from the sorted lists, which
    /// is what makes repeated diff calls byte-identical.
    pub fn assemble(
        meta: DiffMeta,
        mut added_nodes: Vec<NodeRecord>,
        mut removed_nodes: Vec<NodeRecord>,
        mut moved_nodes: Vec<MovedNode>,
        mut modified_nodes: Vec<ModifiedNode>,
        mut added_edges: Vec<EdgeRecord>,
        mut removed_edges: Vec<EdgeRecord>,
    ) -> Self {
        added_nodes.sort_by(|a, b| a.id.cmp(&b.id));
        removed_nodes.sort_by(|a, b| a.id.cmp(&b.id));
        moved_nodes.sort_by(|a, b| a.id.cmp(&b.id));
        modified_nodes.sort_by(|a, b| a.node.id.cmp(&b.node.id));
        added_edges.sort_by(|a, b| (&a.from, &a.to, a.kind).cmp(&(&b.from, &b.to, b.kind)));
        removed_edges.sort_by(|a, b| (&a.from, &a.to, a.kind).cmp(&(&b.from, &b.to, b.kind)));

        let summary = DiffSummary {
            added_nodes: added_nodes.len(),
            removed_nodes: removed_nodes.len(),
            moved_nodes: moved_nodes.len(),
            modified_nodes: modified_nodes.len(),
            added_edges: added_edges.len(),
            removed_edges: removed_edges.len(),
        };

        Self {
            meta,
            summary,
            added_nodes,
            removed_nodes,
            moved_nodes,
            modified_nodes,
            added_edges,
            removed_edges,
        }
    }

    /// An empty report for identical snapshots.
    pub fn empty(meta: DiffMeta) -> Self {
        Self::assemble(
            meta,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    /// Whether any change was classified.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.summary.total() > 0
    }
}
