//! Response format assembly
//!
//! Wraps a synthesized schema in the caller-facing envelope used to
//! constrain LLM generation:
//!
//! ```json
//! {
//!   "type": "json_schema",
//!   "json_schema": { "name": "...", "strict": true, "schema": { ... } }
//! }
//! ```
//!
//! Synthesized definitions are injected under a `$defs` key at the inner
//! schema's root.

use crate::config::SynthesizerConfig;
use crate::depth::ensure_acceptable;
use crate::error::SchemaError;
use crate::overlay::overlay_metadata;
use crate::synthesize::synthesize;
use crate::template::split;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

/// Envelope `type` discriminator
pub const RESPONSE_FORMAT_TYPE: &str = "json_schema";

/// The caller-facing response format envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Always `"json_schema"`
    #[serde(rename = "type")]
    pub format_type: String,

    /// The named, strictness-flagged schema
    pub json_schema: JsonSchemaFormat,
}

/// Inner section of the response format envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    /// Schema name reported to the LLM provider
    pub name: String,

    /// Whether the provider should enforce the schema exactly
    pub strict: bool,

    /// The synthesized JSON-Schema document
    pub schema: Value,
}

/// Synthesize each definition fragment and inject the result under a
/// `$defs` key at the schema root. A missing or empty definitions map
/// leaves the schema untouched.
pub fn attach_defs(mut schema: Value, defs: &Map<String, Value>, strict: bool) -> Value {
    if defs.is_empty() {
        return schema;
    }

    let mut synthesized = Map::new();
    for (name, fragment) in defs {
        synthesized.insert(name.clone(), synthesize(fragment, strict));
    }

    if let Some(root) = schema.as_object_mut() {
        root.insert("$defs".to_string(), Value::Object(synthesized));
    }
    schema
}

/// Wrap a schema in the response format envelope.
pub fn build_response_format(schema: Value, name: &str, strict: bool) -> ResponseFormat {
    ResponseFormat {
        format_type: RESPONSE_FORMAT_TYPE.to_string(),
        json_schema: JsonSchemaFormat {
            name: name.to_string(),
            strict,
            schema,
        },
    }
}

/// Converts template documents into response format envelopes.
///
/// Stateless per invocation: every call synthesizes a fresh envelope
/// from its input, so independent instances can serve concurrent
/// requests without coordination.
pub struct SchemaSynthesizer {
    config: SynthesizerConfig,
}

impl SchemaSynthesizer {
    /// Create a synthesizer with the given configuration
    pub fn new(config: SynthesizerConfig) -> Self {
        Self { config }
    }

    /// Create a synthesizer with default (strict, depth 5) configuration
    pub fn default_config() -> Self {
        Self::new(SynthesizerConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Convert a template document into a response format envelope.
    ///
    /// Runs the full pipeline: depth guard, section split, structural
    /// synthesis, definitions attachment, metadata overlay, envelope.
    pub fn synthesize_response_format(
        &self,
        template: &Value,
        schema_name: &str,
    ) -> Result<ResponseFormat, SchemaError> {
        let observed = ensure_acceptable(template, self.config.max_depth)?;
        debug!("Template depth {} within limit {}", observed, self.config.max_depth);

        let parts = split(template)?;
        let schema = synthesize(&parts.shape, self.config.strict);
        let schema = attach_defs(schema, &parts.defs, self.config.strict);
        let schema = overlay_metadata(schema, &parts.metadata);

        info!(
            "Synthesized schema '{}' ({} definitions, {} annotations)",
            schema_name,
            parts.defs.len(),
            parts.metadata.len()
        );

        Ok(build_response_format(schema, schema_name, self.config.strict))
    }

    /// Serialize a response format to a pretty-printed JSON file.
    ///
    /// A debugging convenience for downstream inspection; validation
    /// always takes schemas by value and never reads this file.
    pub fn write_schema_file(
        &self,
        format: &ResponseFormat,
        path: &Path,
    ) -> Result<(), SchemaError> {
        let rendered = serde_json::to_string_pretty(format)?;
        std::fs::write(path, rendered)?;
        info!("Schema written to '{}'", path.display());
        Ok(())
    }
}
