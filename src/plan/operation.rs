//! Plan documents: declarative, user-authored architectural edits.
//!
//! Plans arrive as JSON and are untrusted input. Shape problems (unknown
//! `op` discriminators, wrong field types) surface as deserialization
//! errors; semantic problems (unknown ids, collisions) surface as
//! validation errors during application, tagged with the operation index.

use crate::error::{GraphDiffError, Result};
use crate::model::{Layer, NodeId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named list of hypothetical edit operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub operations: Vec<PlanOp>,
}

impl Plan {
    /// Parse a plan from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a plan from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| GraphDiffError::io(path, e))?;
        Self::from_json_str(&content)
    }
}

const fn default_layer() -> Layer {
    Layer::C2
}

/// One declarative edit, tagged by its `op` discriminator on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanOp {
    /// Introduce a new aggregate node at the given layer.
    Add {
        name: String,
        #[serde(default = "default_layer")]
        layer: Layer,
        #[serde(default)]
        depends_on: Vec<NodeId>,
    },
    /// Delete a node and everything it owns.
    Remove { id: NodeId },
    /// Reassign a node to a different layer. Never rewrites ids or edges.
    Move {
        id: NodeId,
        #[serde(default = "default_layer")]
        to_layer: Layer,
    },
}

/// Deterministic id for a plan-added node, derived from name and layer.
///
/// `("Payment Service", C2)` becomes `plan:c2:payment_service`. Including
/// the layer keeps two same-named adds at different layers distinct.
#[must_use]
pub fn synthetic_node_id(name: &str, layer: Layer) -> NodeId {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    NodeId::new(format!(
        "plan:{}:{slug}",
        layer.to_string().to_lowercase()
    ))
}
