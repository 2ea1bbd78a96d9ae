//! Error types for livetracer-rs.

use thiserror::Error;

/// The main error type for livetracer-rs operations.
#[derive(Error, Debug)]
pub enum TracerError {
    /// An import payload failed validation before any state was mutated.
    #[error("malformed import: {0}")]
    MalformedImport(String),

    /// An entity with the given id was not found.
    #[error("entity '{0}' not found")]
    UnknownEntity(String),

    /// A group with the given id was not found.
    #[error("group '{0}' not found")]
    UnknownGroup(String),

    /// A reparent operation would make a group a descendant of itself.
    #[error("moving '{0}' would create a cycle")]
    CycleDetected(String),

    /// A reorder anchor is not a sibling of the node being moved.
    #[error("'{0}' and '{1}' are not siblings")]
    NotSiblings(String, String),

    /// A parametric equation string could not be parsed.
    #[error("failed to parse expression '{expr}': {message}")]
    ExprParse { expr: String, message: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for livetracer-rs operations.
pub type Result<T> = std::result::Result<T, TracerError>;
