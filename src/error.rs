//! Unified error types for codegraph-tools.
//!
//! Plan validation failures always carry the index of the offending
//! operation and the id it referenced, so a caller can point at the exact
//! entry of a plan document that needs fixing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for diff and plan operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GraphDiffError {
    /// A plan operation failed validation against the working graph.
    #[error("Plan validation failed at operation {op_index}: {source}")]
    Validation {
        /// Zero-based index of the operation within the plan.
        op_index: usize,
        #[source]
        source: ValidationErrorKind,
    },

    /// An input graph is missing required identity data.
    #[error("Malformed graph ({context}): {source}")]
    MalformedGraph {
        context: String,
        #[source]
        source: MalformedGraphKind,
    },

    /// IO errors with path context (plan file loading).
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization errors.
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Specific plan validation failures.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    #[error("operation references unknown node id '{id}'")]
    UnknownNode { id: String },

    #[error("depends_on references unknown node id '{id}'")]
    UnknownDependency { id: String },

    #[error("synthesized node id '{id}' collides with an existing node")]
    IdCollision { id: String },
}

/// Specific malformed-graph failures.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MalformedGraphKind {
    #[error("node at index {index} has an empty id")]
    MissingId { index: usize },
}

/// Convenient Result type for codegraph-tools operations.
pub type Result<T> = std::result::Result<T, GraphDiffError>;

impl GraphDiffError {
    /// Create a plan validation error for an unknown node reference.
    pub fn unknown_node(op_index: usize, id: impl Into<String>) -> Self {
        Self::Validation {
            op_index,
            source: ValidationErrorKind::UnknownNode { id: id.into() },
        }
    }

    /// Create a plan validation error for an unknown dependency reference.
    pub fn unknown_dependency(op_index: usize, id: impl Into<String>) -> Self {
        Self::Validation {
            op_index,
            source: ValidationErrorKind::UnknownDependency { id: id.into() },
        }
    }

    /// Create a plan validation error for a synthesized id collision.
    pub fn id_collision(op_index: usize, id: impl Into<String>) -> Self {
        Self::Validation {
            op_index,
            source: ValidationErrorKind::IdCollision { id: id.into() },
        }
    }

    /// Create a malformed-graph error with context naming the input.
    pub fn malformed_graph(context: impl Into<String>, source: MalformedGraphKind) -> Self {
        Self::MalformedGraph {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

impl From<std::io::Error> for GraphDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
