//! Error types for schema synthesis

use thiserror::Error;

/// Errors that can occur while turning a template into a response schema
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Template document is structurally unusable (wrong root, missing sections)
    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    /// Template nesting depth is outside the permitted window
    #[error("Invalid template depth: {observed} (permitted: 1..={permitted})")]
    InvalidTemplate {
        /// Depth computed for the rejected template
        observed: usize,
        /// Maximum depth the synthesizer accepts
        permitted: usize,
    },

    /// Failed to write the schema dump file
    #[error("Schema file error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the schema for dumping
    #[error("Schema serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
