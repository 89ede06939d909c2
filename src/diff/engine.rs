//! Structural diff computation between two graph snapshots.

use super::moves::resolve_moves;
use super::result::{
    DiffMeta, DiffReport, EdgeRecord, FieldChanges, FieldDelta, ModifiedNode, MovedNode,
    NodeRecord,
};
use crate::error::{GraphDiffError, MalformedGraphKind, Result};
use crate::model::{EdgeKind, Graph, GraphIndex, Node, NodeId};
use std::collections::{BTreeMap, BTreeSet};

/// Compare two graph snapshots and classify every visible node and edge.
///
/// Pure and deterministic: both graphs are read-only inputs, and calling
/// this twice with identical inputs yields byte-identical reports (every
/// collection is id-sorted). Code-level nodes (abstraction level 0) are
/// filtered from both sides before any matching happens.
///
/// # Errors
///
/// Returns [`GraphDiffError::MalformedGraph`] when either input contains a
/// node with an empty id. Dangling edge references are not errors; they are
/// skipped during classification.
pub fn compute_diff(graph_a: &Graph, graph_b: &Graph, meta: DiffMeta) -> Result<DiffReport> {
    check_identity(graph_a, "graph_a")?;
    check_identity(graph_b, "graph_b")?;

    // Identical snapshots short-circuit to an empty report.
    if graph_a.content_hash() == graph_b.content_hash() {
        return Ok(DiffReport::empty(meta));
    }

    let index_a = GraphIndex::build(graph_a);
    let index_b = GraphIndex::build(graph_b);

    let visible_a = visible_nodes(&index_a);
    let visible_b = visible_nodes(&index_b);
    tracing::debug!(
        visible_a = visible_a.len(),
        visible_b = visible_b.len(),
        "computing structural diff"
    );

    // Partition by id.
    let only_in_a: Vec<&Node> = visible_a
        .iter()
        .filter(|(id, _)| !visible_b.contains_key(*id))
        .map(|(_, node)| *node)
        .collect();
    let only_in_b: Vec<&Node> = visible_b
        .iter()
        .filter(|(id, _)| !visible_a.contains_key(*id))
        .map(|(_, node)| *node)
        .collect();

    // Same id on both sides: compare tracked fields.
    let mut modified_nodes = Vec::new();
    for (id, node_a) in &visible_a {
        let Some(node_b) = visible_b.get(id) else {
            continue;
        };
        let changes = detect_changes(node_a, node_b, &index_a, &index_b);
        if !changes.is_empty() {
            modified_nodes.push(ModifiedNode {
                node: NodeRecord::from_node(node_b),
                changes,
            });
        }
    }

    // Leftover exclusive ids: resolve unambiguous renames, then the rest
    // are plain adds/removes.
    let resolution = resolve_moves(&only_in_a, &only_in_b);
    let moved_nodes: Vec<MovedNode> = resolution
        .moves
        .iter()
        .map(|pair| MovedNode::from_pair(pair.old, pair.new))
        .collect();
    let removed_nodes: Vec<NodeRecord> = only_in_a
        .iter()
        .filter(|node| !resolution.matched_old.contains(&node.id))
        .map(|node| NodeRecord::from_node(node))
        .collect();
    let added_nodes: Vec<NodeRecord> = only_in_b
        .iter()
        .filter(|node| !resolution.matched_new.contains(&node.id))
        .map(|node| NodeRecord::from_node(node))
        .collect();

    // Edge sets, restricted to endpoints that survived the visibility
    // filter on either side.
    let all_visible: BTreeSet<&NodeId> = visible_a.keys().chain(visible_b.keys()).copied().collect();
    let edges_a = edge_keys(graph_a, &all_visible);
    let edges_b = edge_keys(graph_b, &all_visible);
    let added_edges: Vec<EdgeRecord> = edges_b.difference(&edges_a).map(to_record).collect();
    let removed_edges: Vec<EdgeRecord> = edges_a.difference(&edges_b).map(to_record).collect();

    Ok(DiffReport::assemble(
        meta,
        added_nodes,
        removed_nodes,
        moved_nodes,
        modified_nodes,
        added_edges,
        removed_edges,
    ))
}

/// Reject graphs whose nodes cannot be identified.
fn check_identity(graph: &Graph, context: &str) -> Result<()> {
    for (index, node) in graph.nodes.iter().enumerate() {
        if node.id.is_empty() {
            return Err(GraphDiffError::malformed_graph(
                context,
                MalformedGraphKind::MissingId { index },
            ));
        }
    }
    Ok(())
}

/// Diff-visible nodes of one snapshot, keyed by id in sorted order.
fn visible_nodes<'a>(index: &GraphIndex<'a>) -> BTreeMap<&'a NodeId, &'a Node> {
    index
        .ids()
        .filter_map(|id| index.node(id))
        .filter(|node| node.is_diff_visible())
        .map(|node| (&node.id, node))
        .collect()
}

/// Compare the tracked fields of one node across snapshots.
///
/// Scalar metrics count as changed only when present on both sides; the
/// adjacency signature comparison is what surfaces edge-weight drift as a
/// modification of the owning node.
fn detect_changes(
    node_a: &Node,
    node_b: &Node,
    index_a: &GraphIndex<'_>,
    index_b: &GraphIndex<'_>,
) -> FieldChanges {
    let mut changes = FieldChanges::new();

    if let (Some(old), Some(new)) = (node_a.lines_of_code, node_b.lines_of_code) {
        if old != new {
            changes.insert("lines_of_code".to_string(), FieldDelta::of(old, new));
        }
    }
    if let (Some(old), Some(new)) = (node_a.export_count, node_b.export_count) {
        if old != new {
            changes.insert("export_count".to_string(), FieldDelta::of(old, new));
        }
    }
    if node_a.abstraction_level != node_b.abstraction_level {
        changes.insert(
            "abstraction_level".to_string(),
            FieldDelta::of(node_a.abstraction_level, node_b.abstraction_level),
        );
    }

    let sig_a = index_a.signature(&node_a.id);
    let sig_b = index_b.signature(&node_b.id);
    if sig_a != sig_b {
        changes.insert(
            "edges".to_string(),
            FieldDelta(
                FieldDelta::signature_value(&sig_a),
                FieldDelta::signature_value(&sig_b),
            ),
        );
    }

    changes
}

/// `(from, to, type)` identity tuples for edges whose endpoints are both
/// visible somewhere.
fn edge_keys<'a>(
    graph: &'a Graph,
    visible: &BTreeSet<&NodeId>,
) -> BTreeSet<(&'a NodeId, &'a NodeId, EdgeKind)> {
    graph
        .edges
        .iter()
        .filter(|edge| visible.contains(&edge.from) && visible.contains(&edge.to))
        .map(|edge| (&edge.from, &edge.to, edge.kind))
        .collect()
}

fn to_record(key: &(&NodeId, &NodeId, EdgeKind)) -> EdgeRecord {
    EdgeRecord {
        from: key.0.clone(),
        to: key.1.clone(),
        kind: key.2,
    }
}
