//! Structify Schema
//!
//! Converts user-supplied template documents into strict JSON-Schema
//! response formats for constraining LLM output.
//!
//! # Overview
//!
//! A template is a concrete example of the desired output (e.g.
//! `{"title": "string", "steps": ["string"]}`), optionally wrapped in an
//! extended form carrying reusable `$defs` fragments and per-field
//! `metadata` annotations. The synthesizer derives a closed-world
//! JSON-Schema from it: every template field becomes a required
//! property, undeclared fields are rejected, and array item schemas are
//! inferred from the first element.
//!
//! # Architecture
//!
//! ```text
//! Template → Depth Guard → split → synthesize → $defs → metadata overlay → ResponseFormat
//! ```
//!
//! # Example Usage
//!
//! ```
//! use structify_schema::{SchemaSynthesizer, SynthesizerConfig};
//! use serde_json::json;
//!
//! let template = json!({
//!     "response_schema": {"title": "string", "servings": 2},
//!     "metadata": {"title": {"nullable": true}}
//! });
//!
//! let synthesizer = SchemaSynthesizer::new(SynthesizerConfig::default());
//! let format = synthesizer.synthesize_response_format(&template, "recipe").unwrap();
//!
//! assert_eq!(format.json_schema.name, "recipe");
//! assert!(format.json_schema.strict);
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod depth;
mod template;
mod synthesize;
mod overlay;
mod response_format;

pub use error::SchemaError;
pub use config::{SynthesizerConfig, DEFAULT_MAX_DEPTH};
pub use depth::{depth, ensure_acceptable, is_acceptable};
pub use template::{split, FieldMetadata, TemplateParts};
pub use synthesize::synthesize;
pub use overlay::overlay_metadata;
pub use response_format::{
    attach_defs, build_response_format, JsonSchemaFormat, ResponseFormat,
    SchemaSynthesizer, RESPONSE_FORMAT_TYPE,
};

use serde_json::Value;

/// Convert a template into a response format with default configuration.
///
/// Convenience wrapper over [`SchemaSynthesizer::synthesize_response_format`].
pub fn synthesize_response_format(
    template: &Value,
    schema_name: &str,
) -> Result<ResponseFormat, SchemaError> {
    SchemaSynthesizer::default_config().synthesize_response_format(template, schema_name)
}
