//! Template document splitting
//!
//! A template is an example JSON document describing the desired output
//! shape. In its extended form it carries three top-level sections:
//!
//! ```json
//! {
//!   "response_schema": { "title": "string", "steps": ["string"] },
//!   "$defs": { "ingredient": { "name": "string", "amount": 1.0 } },
//!   "metadata": { "title": { "description": "Recipe name", "nullable": true } }
//! }
//! ```
//!
//! `response_schema` is mandatory; the other two sections default to
//! empty when absent.

use crate::error::SchemaError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level section holding the shape to convert
pub const RESPONSE_SCHEMA_KEY: &str = "response_schema";
/// Top-level section holding reusable definitions
pub const DEFS_KEY: &str = "$defs";
/// Top-level section holding per-field annotations
pub const METADATA_KEY: &str = "metadata";

/// Per-field annotations merged into the synthesized schema
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldMetadata {
    /// Human-readable field description
    pub description: Option<String>,

    /// Widen the field's type to also accept `null`
    #[serde(default)]
    pub nullable: bool,

    /// Restrict the field to a fixed set of values
    #[serde(rename = "enum")]
    pub allowed_values: Option<Vec<Value>>,
}

/// The three sections of a template document
#[derive(Debug, Clone)]
pub struct TemplateParts {
    /// The example shape to convert into a schema
    pub shape: Value,

    /// Named reusable template fragments, empty if the section was absent
    pub defs: Map<String, Value>,

    /// Field annotations in template declaration order
    pub metadata: Vec<(String, FieldMetadata)>,
}

/// Split a template document into its sections.
///
/// Fails with [`SchemaError::MalformedTemplate`] when the root is not an
/// object, when `response_schema` is absent or empty, or when a present
/// section has the wrong shape. Unknown metadata attribute keys are
/// ignored.
pub fn split(template: &Value) -> Result<TemplateParts, SchemaError> {
    let root = template.as_object().ok_or_else(|| {
        SchemaError::MalformedTemplate("template root must be a JSON object".to_string())
    })?;

    let shape = root.get(RESPONSE_SCHEMA_KEY).ok_or_else(|| {
        SchemaError::MalformedTemplate(format!(
            "missing required '{RESPONSE_SCHEMA_KEY}' section"
        ))
    })?;

    if is_empty_shape(shape) {
        return Err(SchemaError::MalformedTemplate(format!(
            "'{RESPONSE_SCHEMA_KEY}' section is empty"
        )));
    }

    let defs = match root.get(DEFS_KEY) {
        None => Map::new(),
        Some(Value::Object(defs)) => defs.clone(),
        Some(_) => {
            return Err(SchemaError::MalformedTemplate(format!(
                "'{DEFS_KEY}' section must be an object"
            )));
        }
    };

    let metadata = match root.get(METADATA_KEY) {
        None => Vec::new(),
        Some(Value::Object(entries)) => parse_metadata(entries)?,
        Some(_) => {
            return Err(SchemaError::MalformedTemplate(format!(
                "'{METADATA_KEY}' section must be an object"
            )));
        }
    };

    Ok(TemplateParts {
        shape: shape.clone(),
        defs,
        metadata,
    })
}

fn is_empty_shape(shape: &Value) -> bool {
    match shape {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn parse_metadata(
    entries: &Map<String, Value>,
) -> Result<Vec<(String, FieldMetadata)>, SchemaError> {
    let mut metadata = Vec::with_capacity(entries.len());
    for (field, attributes) in entries {
        let parsed: FieldMetadata =
            serde_json::from_value(attributes.clone()).map_err(|e| {
                SchemaError::MalformedTemplate(format!(
                    "invalid metadata for field '{field}': {e}"
                ))
            })?;
        metadata.push((field.clone(), parsed));
    }
    Ok(metadata)
}
