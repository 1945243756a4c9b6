//! Candidate document validation against JSON-Schema

use crate::error::{ValidatorError, Violation, Violations};
use jsonschema::error::ValidationErrorKind;
use jsonschema::Draft;
use serde_json::Value;
use tracing::debug;

/// Validates LLM-produced documents against JSON-Schema documents.
///
/// Uses Draft 2020-12 semantics: objects are checked property-by-property
/// against `properties`/`required`/`additionalProperties`, arrays
/// per-item against `items`, scalars against the declared `type`
/// (including multi-type unions such as `["string", "null"]`), and
/// `$ref`s are resolved locally against the schema's own `$defs`.
///
/// Schemas are accepted by value only; the validator never loads them
/// from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureValidator;

impl StructureValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Check `candidate` against `schema`.
    ///
    /// Returns `Ok(())` only when the document fully satisfies the
    /// schema. A failing document yields
    /// [`ValidatorError::InvalidDocument`] with the complete violation
    /// list; a schema that cannot be compiled yields
    /// [`ValidatorError::InvalidSchema`]; resolution failures surfacing
    /// mid-validation yield [`ValidatorError::Unexpected`].
    pub fn validate(&self, candidate: &Value, schema: &Value) -> Result<(), ValidatorError> {
        if !(schema.is_object() || schema.is_boolean()) {
            return Err(ValidatorError::InvalidSchema {
                reason: "schema root must be an object or boolean".to_string(),
            });
        }

        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .map_err(|e| ValidatorError::InvalidSchema {
                reason: e.to_string(),
            })?;

        let mut violations = Vec::new();
        for error in validator.iter_errors(candidate) {
            match &error.kind {
                // A $ref that cannot be resolved is a validator-side
                // failure, not a property of the candidate document.
                ValidationErrorKind::Referencing(e) => {
                    return Err(ValidatorError::Unexpected(format!(
                        "reference resolution failed: {e}"
                    )));
                }
                _ => violations.push(Violation {
                    instance_path: error.instance_path.to_string(),
                    schema_path: error.schema_path.to_string(),
                    message: error.to_string(),
                }),
            }
        }

        if violations.is_empty() {
            debug!("Candidate document conforms to schema");
            Ok(())
        } else {
            debug!("Candidate document has {} violations", violations.len());
            Err(ValidatorError::InvalidDocument {
                violations: Violations::new(violations),
            })
        }
    }
}

/// Check a candidate document against a schema with a fresh validator.
pub fn validate_document(candidate: &Value, schema: &Value) -> Result<(), ValidatorError> {
    StructureValidator::new().validate(candidate, schema)
}
