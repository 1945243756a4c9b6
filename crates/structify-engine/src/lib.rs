//! Structify Engine
//!
//! Orchestrates the text-to-structured-JSON pipeline.
//!
//! # Architecture
//!
//! ```text
//! Text + Template → Schema Synthesizer → LLM (response_format) → Parser → Validator → Document
//! ```
//!
//! The engine owns no policy beyond the pipeline itself: schema
//! synthesis and validation live in their own crates, retry/backoff
//! against the provider lives in the provider, and retrying a failed
//! validation with a regenerated completion is the caller's decision.
//! Validation failures carry the full violation list for exactly that
//! purpose.
//!
//! # Example Usage
//!
//! ```no_run
//! use structify_engine::{Engine, EngineConfig, StructureRequest};
//! use structify_llm::MockProvider;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"title": "Pasta", "servings": 4}"#);
//! let engine = Engine::new(llm, EngineConfig::default());
//!
//! let request = StructureRequest::new(
//!     "Pasta for four people.",
//!     json!({"response_schema": {"title": "string", "servings": 1}}),
//! );
//!
//! let outcome = engine.structure(request).await?;
//! println!("{}", outcome.document);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod prompt;
mod completion;
mod engine;

#[cfg(test)]
mod tests;

pub use error::EngineError;
pub use config::EngineConfig;
pub use types::{StructureMetadata, StructureOutcome, StructureRequest};
pub use prompt::PromptBuilder;
pub use completion::parse_completion;
pub use engine::Engine;
