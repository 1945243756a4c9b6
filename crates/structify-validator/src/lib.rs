//! Structify Validator
//!
//! Confirms that LLM-produced JSON documents structurally match a
//! JSON-Schema document, with standard Draft 2020-12 semantics.
//!
//! The validator is the gate between LLM output and the caller: a
//! document either fully satisfies its schema or validation fails with
//! the complete list of violations (failing path, violated keyword,
//! human-readable reason) so the caller can report the failure or feed
//! it back into a retry prompt.
//!
//! # Examples
//!
//! ```
//! use structify_validator::validate_document;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"title": {"type": "string"}},
//!     "required": ["title"],
//!     "additionalProperties": false
//! });
//!
//! assert!(validate_document(&json!({"title": "Pasta"}), &schema).is_ok());
//! assert!(validate_document(&json!({"count": 1}), &schema).is_err());
//! ```

#![warn(missing_docs)]

mod error;
mod validator;

pub use error::{ValidatorError, Violation, Violations};
pub use validator::{validate_document, StructureValidator};
