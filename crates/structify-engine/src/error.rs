//! Error types for the extraction engine

use structify_llm::LlmError;
use structify_schema::SchemaError;
use structify_validator::ValidatorError;
use thiserror::Error;

/// Errors that can occur during a structuring run
#[derive(Error, Debug)]
pub enum EngineError {
    /// Template could not be turned into a response schema
    #[error("Template error: {0}")]
    Template(#[from] SchemaError),

    /// The LLM's document does not conform to the synthesized schema
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidatorError),

    /// LLM provider failure
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The completion text is not decodable JSON
    #[error("Completion is not valid JSON: {0}")]
    MalformedDocument(String),

    /// Input text exceeds the configured maximum
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// The provider did not answer within the configured timeout
    #[error("Completion timeout")]
    Timeout,

    /// Internal serialization failure
    #[error("Internal serialization error: {0}")]
    Internal(#[from] serde_json::Error),
}
