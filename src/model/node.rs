//! Node identity, kinds, and the layer/abstraction-level mapping.
//!
//! Node ids are the load-bearing invariant of the whole diff pipeline: two
//! nodes from different snapshots are "the same entity" iff they share an
//! id, or (for move detection) the same name and kind under different ids.
//! Ids are type-prefixed path strings (`dir:backend/services`,
//! `file:backend/services/auth_service.py`) produced by the analyzer, or
//! `plan:<layer>:<slug>` for plan-synthesized nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, type-prefixed identifier for a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the underlying identifier string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// An id with no content cannot identify anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Node type classification.
///
/// Code-level kinds (class, function, interface, type alias) exist in the
/// graph for enrichment but never appear in diff output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum NodeKind {
    Directory,
    File,
    Class,
    Function,
    Interface,
    TypeAlias,
    /// Synthetic aggregate above file level.
    Component,
    Container,
    System,
}

impl NodeKind {
    /// Whether this kind names a code-level entity (C4 tier).
    #[must_use]
    pub const fn is_code_level(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Function | Self::Interface | Self::TypeAlias
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Directory => "directory",
            Self::File => "file",
            Self::Class => "class",
            Self::Function => "function",
            Self::Interface => "interface",
            Self::TypeAlias => "type_alias",
            Self::Component => "component",
            Self::Container => "container",
            Self::System => "system",
        };
        write!(f, "{s}")
    }
}

/// Architectural tier in the C1..C4 sense, coarse to fine.
///
/// The numeric mapping is fixed: `C1→3, C2→2, C3→1, C4→0`. Only levels
/// ≥ 1 (C3 and above) are visible in diff output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    C1,
    C2,
    C3,
    C4,
}

/// Minimum abstraction level that appears in diff output.
pub const DIFF_VISIBLE_MIN_LEVEL: u8 = 1;

impl Layer {
    /// Numeric abstraction level for this tier.
    #[must_use]
    pub const fn abstraction_level(self) -> u8 {
        match self {
            Self::C1 => 3,
            Self::C2 => 2,
            Self::C3 => 1,
            Self::C4 => 0,
        }
    }

    /// Tier for a numeric abstraction level, clamping anything above C1.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Self::C4,
            1 => Self::C3,
            2 => Self::C2,
            _ => Self::C1,
        }
    }

    /// Whether nodes at this tier appear in diff output.
    #[must_use]
    pub const fn is_diff_visible(self) -> bool {
        self.abstraction_level() >= DIFF_VISIBLE_MIN_LEVEL
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::C1 => "C1",
            Self::C2 => "C2",
            Self::C3 => "C3",
            Self::C4 => "C4",
        };
        write!(f, "{s}")
    }
}

/// A versioned snapshot of one codebase entity.
///
/// Everything except `id` and `type` is optional on the wire; a field absent
/// on either side of a comparison counts as unchanged rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub lines_of_code: Option<u64>,
    #[serde(default)]
    pub export_count: Option<u64>,
    /// Numeric tier per [`Layer`]; defaults to code level when absent.
    #[serde(default)]
    pub abstraction_level: u8,
    /// Ownership back-reference to the containing node, never itself owned.
    #[serde(default)]
    pub parent: Option<NodeId>,
}

impl Node {
    /// Create a node with the given identity; remaining fields default.
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            file_path: None,
            language: None,
            lines_of_code: None,
            export_count: None,
            abstraction_level: 0,
            parent: None,
        }
    }

    /// Set the abstraction level.
    #[must_use]
    pub const fn with_level(mut self, level: u8) -> Self {
        self.abstraction_level = level;
        self
    }

    /// Set the file path.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Set the ownership back-reference.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the code-size metric.
    #[must_use]
    pub const fn with_lines_of_code(mut self, loc: u64) -> Self {
        self.lines_of_code = Some(loc);
        self
    }

    /// Set the export count metric.
    #[must_use]
    pub const fn with_export_count(mut self, count: u64) -> Self {
        self.export_count = Some(count);
        self
    }

    /// Whether this node appears in diff output.
    #[must_use]
    pub const fn is_diff_visible(&self) -> bool {
        self.abstraction_level >= DIFF_VISIBLE_MIN_LEVEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_level_round_trip() {
        assert_eq!(Layer::C1.abstraction_level(), 3);
        assert_eq!(Layer::C2.abstraction_level(), 2);
        assert_eq!(Layer::C3.abstraction_level(), 1);
        assert_eq!(Layer::C4.abstraction_level(), 0);

        for layer in [Layer::C1, Layer::C2, Layer::C3, Layer::C4] {
            assert_eq!(Layer::from_level(layer.abstraction_level()), layer);
        }
    }

    #[test]
    fn test_only_c3_and_above_diff_visible() {
        assert!(Layer::C1.is_diff_visible());
        assert!(Layer::C2.is_diff_visible());
        assert!(Layer::C3.is_diff_visible());
        assert!(!Layer::C4.is_diff_visible());
    }

    #[test]
    fn test_node_kind_wire_names() {
        let json = serde_json::to_string(&NodeKind::TypeAlias).expect("serialize kind");
        assert_eq!(json, "\"type_alias\"");
        let kind: NodeKind = serde_json::from_str("\"directory\"").expect("deserialize kind");
        assert_eq!(kind, NodeKind::Directory);
    }

    #[test]
    fn test_node_tolerates_missing_optional_fields() {
        let node: Node = serde_json::from_str(r#"{"id": "file:a.py", "type": "file"}"#)
            .expect("minimal node should deserialize");
        assert_eq!(node.id.value(), "file:a.py");
        assert_eq!(node.abstraction_level, 0);
        assert!(node.lines_of_code.is_none());
        assert!(node.parent.is_none());
    }

    #[test]
    fn test_node_missing_identity_field_is_rejected() {
        let result: std::result::Result<Node, _> =
            serde_json::from_str(r#"{"type": "file", "name": "a.py"}"#);
        assert!(result.is_err(), "node without id must not deserialize");
    }
}
