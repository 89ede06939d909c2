//! Move detection over the exclusive id sets.
//!
//! A node that disappeared under one id and reappeared under another with
//! the same name and kind is a move, not a delete plus an add, but only
//! when the pairing is unambiguous. The outcome is modeled as an explicit
//! tri-state so the "give up and report add/remove" path is a first-class
//! branch rather than a fallthrough.

use crate::model::{Node, NodeId, NodeKind};
use std::collections::{BTreeMap, BTreeSet};

/// Classification of one `(name, kind)` bucket across the exclusive sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Exactly one removed and one added node share the identity; pair them.
    Unique,
    /// Nothing to pair with on the other side.
    NoCandidate,
    /// More than one possible pairing; never guess.
    Ambiguous,
}

impl MoveOutcome {
    /// Classify a bucket by how many removed/added nodes share its identity.
    #[must_use]
    pub const fn classify(removed: usize, added: usize) -> Self {
        match (removed, added) {
            (1, 1) => Self::Unique,
            (0, _) | (_, 0) => Self::NoCandidate,
            _ => Self::Ambiguous,
        }
    }
}

/// One resolved move: the removed node and the added node it became.
#[derive(Debug, Clone, Copy)]
pub struct MovePair<'a> {
    pub old: &'a Node,
    pub new: &'a Node,
}

/// Result of move resolution: the pairs, plus the ids consumed from each
/// exclusive set (everything else stays classified as removed/added).
#[derive(Debug, Default)]
pub struct MoveResolution<'a> {
    pub moves: Vec<MovePair<'a>>,
    pub matched_old: BTreeSet<&'a NodeId>,
    pub matched_new: BTreeSet<&'a NodeId>,
}

/// Pair up removed and added nodes that share `(name, kind)`.
///
/// Buckets both sides by identity and emits a move only for 1↔1 buckets.
/// A bucket with several removed or several added members (two files both
/// named `index.ts`, say) degrades to plain add/remove for every member.
pub fn resolve_moves<'a>(removed: &[&'a Node], added: &[&'a Node]) -> MoveResolution<'a> {
    let mut buckets: BTreeMap<(&'a str, NodeKind), (Vec<&'a Node>, Vec<&'a Node>)> =
        BTreeMap::new();
    for &node in removed {
        buckets
            .entry((node.name.as_str(), node.kind))
            .or_default()
            .0
            .push(node);
    }
    for &node in added {
        buckets
            .entry((node.name.as_str(), node.kind))
            .or_default()
            .1
            .push(node);
    }

    let mut resolution = MoveResolution::default();
    for ((name, kind), (old, new)) in buckets {
        match MoveOutcome::classify(old.len(), new.len()) {
            MoveOutcome::Unique => {
                resolution.moves.push(MovePair {
                    old: old[0],
                    new: new[0],
                });
                resolution.matched_old.insert(&old[0].id);
                resolution.matched_new.insert(&new[0].id);
            }
            MoveOutcome::NoCandidate => {}
            MoveOutcome::Ambiguous => {
                tracing::debug!(
                    name,
                    %kind,
                    removed = old.len(),
                    added = new.len(),
                    "ambiguous move candidates; reporting as add/remove"
                );
            }
        }
    }
    resolution
}
