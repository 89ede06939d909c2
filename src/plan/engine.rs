//! Plan application: clone, edit, diff.
//!
//! The caller's graph is never touched. Operations apply to a deep clone in
//! listed order; the first validation failure aborts the whole application
//! before the diff step runs, so a failed plan has no observable effect.

use super::operation::{synthetic_node_id, Plan, PlanOp};
use crate::diff::{compute_diff, DiffMeta, DiffReport};
use crate::error::{GraphDiffError, Result};
use crate::model::{Edge, EdgeKind, Graph, GraphIndex, Layer, Node, NodeId, NodeKind};
use std::collections::BTreeSet;

/// Id of the synthetic root that anchors plan-added nodes with no
/// unambiguous parent.
pub const ROOT_SENTINEL_ID: &str = "system:root";

/// Apply a plan to a working copy of `graph` and diff the result against
/// the original.
///
/// # Errors
///
/// Returns [`GraphDiffError::Validation`] when an operation references a
/// nonexistent id or an `add` synthesizes a colliding id. The error carries
/// the operation index and the offending id, and the caller's graph is left
/// untouched in every path.
pub fn apply_plan(graph: &Graph, plan: &Plan) -> Result<DiffReport> {
    tracing::debug!(
        plan = %plan.name,
        operations = plan.operations.len(),
        "applying plan to working copy"
    );

    let mut working = graph.clone();
    for (op_index, op) in plan.operations.iter().enumerate() {
        apply_op(&mut working, op_index, op)?;
    }

    compute_diff(graph, &working, DiffMeta::plan(plan.name.clone()))
}

fn apply_op(working: &mut Graph, op_index: usize, op: &PlanOp) -> Result<()> {
    match op {
        PlanOp::Add {
            name,
            layer,
            depends_on,
        } => apply_add(working, op_index, name, *layer, depends_on),
        PlanOp::Remove { id } => apply_remove(working, op_index, id),
        PlanOp::Move { id, to_layer } => apply_move(working, op_index, id, *to_layer),
    }
}

/// Aggregate node kind for a plan-added node at the given layer.
const fn aggregate_kind(layer: Layer) -> NodeKind {
    match layer {
        Layer::C1 => NodeKind::System,
        Layer::C2 => NodeKind::Container,
        Layer::C3 => NodeKind::Component,
        Layer::C4 => NodeKind::File,
    }
}

fn apply_add(
    working: &mut Graph,
    op_index: usize,
    name: &str,
    layer: Layer,
    depends_on: &[NodeId],
) -> Result<()> {
    let node_id = synthetic_node_id(name, layer);
    let level = layer.abstraction_level();

    // Validate and pick a parent against the pre-mutation snapshot.
    let (parent, need_root) = {
        let index = GraphIndex::build(working);
        if index.contains(&node_id) {
            return Err(GraphDiffError::id_collision(op_index, node_id.value()));
        }
        for dep in depends_on {
            if !index.contains(dep) {
                return Err(GraphDiffError::unknown_dependency(op_index, dep.value()));
            }
        }

        // The implied ancestor is the unique node one level coarser; any
        // other census (zero or several candidates) falls back to the root
        // sentinel rather than guessing.
        let candidates: Vec<NodeId> = index
            .ids()
            .filter_map(|id| index.node(id))
            .filter(|node| node.abstraction_level == level + 1)
            .map(|node| node.id.clone())
            .collect();
        match candidates.as_slice() {
            [only] => (only.clone(), false),
            _ => {
                let root_id = NodeId::from(ROOT_SENTINEL_ID);
                let need_root = !index.contains(&root_id);
                (root_id, need_root)
            }
        }
    };

    if need_root {
        working.add_node(
            Node::new(ROOT_SENTINEL_ID, NodeKind::System, "root")
                .with_level(Layer::C1.abstraction_level()),
        );
    }

    let node = Node::new(node_id.clone(), aggregate_kind(layer), name)
        .with_level(level)
        .with_file_path(format!("(planned)/{name}"))
        .with_lines_of_code(0)
        .with_export_count(0)
        .with_parent(parent.clone());
    working.add_node(node);
    working.add_edge(Edge::new(parent, node_id.clone(), EdgeKind::Contains));

    for dep in depends_on {
        working.add_edge(Edge::new(node_id.clone(), dep.clone(), EdgeKind::Imports));
    }
    Ok(())
}

fn apply_remove(working: &mut Graph, op_index: usize, target: &NodeId) -> Result<()> {
    // Collect the ownership closure before mutating. The visited set keeps
    // traversal terminating even over a malformed cyclic ownership graph.
    let removal: BTreeSet<NodeId> = {
        let index = GraphIndex::build(working);
        if !index.contains(target) {
            return Err(GraphDiffError::unknown_node(op_index, target.value()));
        }

        let mut visited = BTreeSet::new();
        let mut stack = vec![target.clone()];
        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            for child in index.children(&current) {
                if !visited.contains(*child) {
                    stack.push((*child).clone());
                }
            }
        }
        visited
    };

    tracing::debug!(
        target = %target,
        cascade_size = removal.len(),
        "removing ownership closure"
    );
    working.nodes.retain(|node| !removal.contains(&node.id));
    working
        .edges
        .retain(|edge| !removal.contains(&edge.from) && !removal.contains(&edge.to));
    Ok(())
}

fn apply_move(working: &mut Graph, op_index: usize, target: &NodeId, to_layer: Layer) -> Result<()> {
    let level = to_layer.abstraction_level();
    let mut found = false;
    for node in working.nodes.iter_mut().filter(|n| &n.id == target) {
        node.abstraction_level = level;
        found = true;
    }
    if !found {
        return Err(GraphDiffError::unknown_node(op_index, target.value()));
    }
    Ok(())
}
