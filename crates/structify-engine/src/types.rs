//! Request and response types for structuring runs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to structure unstructured text
#[derive(Debug, Clone)]
pub struct StructureRequest {
    /// Text to extract structured data from
    pub text: String,

    /// Template document describing the desired output shape
    pub template: Value,

    /// Optional raw examples document (separator-delimited blocks)
    pub examples: Option<String>,

    /// Per-request schema name override
    pub schema_name: Option<String>,
}

impl StructureRequest {
    /// Create a request with no examples and the configured schema name
    pub fn new(text: impl Into<String>, template: Value) -> Self {
        Self {
            text: text.into(),
            template,
            examples: None,
            schema_name: None,
        }
    }
}

/// Result of a successful structuring run
#[derive(Debug, Clone)]
pub struct StructureOutcome {
    /// The validated structured document
    pub document: Value,

    /// Metadata about the run
    pub metadata: StructureMetadata,
}

/// Metadata about a structuring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureMetadata {
    /// Schema name used for this run
    pub schema_name: String,

    /// Name of the LLM model used
    pub model_name: String,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
