//! Per-call index maps over one graph snapshot.
//!
//! Engines never hold global caches; they build a [`GraphIndex`] from a
//! borrowed graph at the start of every call and throw it away afterwards.
//! The index is where input tolerance lives: duplicate ids resolve
//! last-write-wins with a warning, and edges with a missing endpoint are
//! skipped rather than trusted.

use super::{EdgeKind, Graph, Node, NodeId};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};

/// One entry of a node's edge-adjacency signature: the edge type, the node
/// on the other end, and the edge weight. Kept ordered so signatures compare
/// and serialize deterministically.
pub type SignatureEntry = (EdgeKind, NodeId, u64);

/// Precomputed lookups for one graph snapshot.
#[derive(Debug)]
#[must_use]
pub struct GraphIndex<'a> {
    /// Nodes by id, in first-seen order. Last write wins on duplicates.
    by_id: IndexMap<&'a NodeId, &'a Node>,
    /// Edge-adjacency signatures, undirected, per node id.
    adjacency: HashMap<&'a NodeId, BTreeSet<SignatureEntry>>,
    /// Ownership children: union of `contains` edge targets and `parent`
    /// back-references pointing at the key.
    children: HashMap<&'a NodeId, Vec<&'a NodeId>>,
    /// Distinct node ids that appeared more than once in the input.
    collision_count: usize,
}

impl<'a> GraphIndex<'a> {
    /// Build the index in one O(nodes + edges) pass.
    pub fn build(graph: &'a Graph) -> Self {
        let mut by_id: IndexMap<&'a NodeId, &'a Node> = IndexMap::new();
        let mut collision_count = 0;
        for node in &graph.nodes {
            if by_id.insert(&node.id, node).is_some() {
                collision_count += 1;
            }
        }
        if collision_count > 0 {
            tracing::warn!(
                collision_count,
                "duplicate node ids in input graph; keeping the last occurrence of each"
            );
        }

        let mut adjacency: HashMap<&'a NodeId, BTreeSet<SignatureEntry>> = HashMap::new();
        let mut children: HashMap<&'a NodeId, Vec<&'a NodeId>> = HashMap::new();

        for edge in &graph.edges {
            let (Some((from, _)), Some((to, _))) = (
                by_id.get_key_value(&edge.from),
                by_id.get_key_value(&edge.to),
            ) else {
                tracing::debug!(
                    from = %edge.from,
                    to = %edge.to,
                    kind = %edge.kind,
                    "skipping edge with dangling endpoint"
                );
                continue;
            };

            adjacency
                .entry(from)
                .or_default()
                .insert((edge.kind, edge.to.clone(), edge.weight));
            adjacency
                .entry(to)
                .or_default()
                .insert((edge.kind, edge.from.clone(), edge.weight));

            if edge.kind == EdgeKind::Contains {
                let entry = children.entry(from).or_default();
                if !entry.contains(&to) {
                    entry.push(to);
                }
            }
        }

        // Parent back-references are the second half of the ownership
        // relation; a well-formed graph has both, a partial one may have
        // either.
        for node in &graph.nodes {
            let Some(parent) = &node.parent else { continue };
            let Some((parent_key, _)) = by_id.get_key_value(parent) else {
                continue;
            };
            let Some((child_key, _)) = by_id.get_key_value(&node.id) else {
                continue;
            };
            let entry = children.entry(parent_key).or_default();
            if !entry.contains(&child_key) {
                entry.push(child_key);
            }
        }

        Self {
            by_id,
            adjacency,
            children,
            collision_count,
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }

    /// Whether the id names a node in this snapshot.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.by_id.contains_key(id)
    }

    /// All node ids in first-seen order.
    pub fn ids(&self) -> impl Iterator<Item = &'a NodeId> + '_ {
        self.by_id.keys().copied()
    }

    /// The node's adjacency signature; empty when the node has no intact
    /// edges.
    #[must_use]
    pub fn signature(&self, id: &NodeId) -> BTreeSet<SignatureEntry> {
        self.adjacency.get(id).cloned().unwrap_or_default()
    }

    /// Ownership children of the node (targets of `contains` edges plus
    /// nodes whose `parent` points here).
    #[must_use]
    pub fn children(&self, id: &NodeId) -> &[&'a NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct ids that appeared more than once in the input graph.
    #[must_use]
    pub const fn collision_count(&self) -> usize {
        self.collision_count
    }

    /// Indexed node count (after duplicate collapse).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.by_id.len()
    }
}
