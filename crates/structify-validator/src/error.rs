//! Error types for structural validation

use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating a candidate document
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The schema itself is not a well-formed JSON-Schema document
    #[error("Invalid schema: {reason}")]
    InvalidSchema {
        /// Why the schema could not be compiled
        reason: String,
    },

    /// The candidate document violates the schema
    #[error("Document failed validation:\n{violations}")]
    InvalidDocument {
        /// Every violation found, not just the first
        violations: Violations,
    },

    /// Validator-internal failure distinct from a schema/document mismatch
    #[error("Unexpected validation failure: {0}")]
    Unexpected(String),
}

/// A single validation violation with structured context
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer to the violating location in the candidate
    pub instance_path: String,

    /// JSON Pointer to the schema keyword that was violated
    pub schema_path: String,

    /// Human-readable description of the violation
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// The complete list of violations for one failed validation
#[derive(Debug, Clone)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Wrap a non-empty list of violations
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when there are no violations
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume self and return the inner list
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}
