//! Template nesting depth guard
//!
//! Rejects documents that are either flat (a bare scalar or empty
//! container describes no fields) or nested beyond the configured
//! maximum, before they reach the synthesizer.

use crate::error::SchemaError;
use serde_json::Value;

/// Compute the nesting depth of a JSON value.
///
/// Scalars and empty containers have depth 0; a non-empty object or
/// array is one deeper than its deepest child.
///
/// Walks the tree with an explicit work stack so arbitrarily nested
/// input cannot overflow the host stack.
pub fn depth(value: &Value) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(value, 0usize)];

    while let Some((node, parent_depth)) = stack.pop() {
        match node {
            Value::Object(fields) if !fields.is_empty() => {
                deepest = deepest.max(parent_depth + 1);
                for child in fields.values() {
                    stack.push((child, parent_depth + 1));
                }
            }
            Value::Array(items) if !items.is_empty() => {
                deepest = deepest.max(parent_depth + 1);
                for child in items {
                    stack.push((child, parent_depth + 1));
                }
            }
            _ => deepest = deepest.max(parent_depth),
        }
    }

    deepest
}

/// Whether a computed depth falls inside the accepted window.
///
/// Depth 0 is rejected: a template must describe at least one field.
pub fn is_acceptable(depth: usize, max_depth: usize) -> bool {
    depth > 0 && depth <= max_depth
}

/// Compute the depth of `value` and fail if it is outside the window.
///
/// Returns the observed depth on success so callers can log it.
pub fn ensure_acceptable(value: &Value, max_depth: usize) -> Result<usize, SchemaError> {
    let observed = depth(value);
    if is_acceptable(observed, max_depth) {
        Ok(observed)
    } else {
        Err(SchemaError::InvalidTemplate {
            observed,
            permitted: max_depth,
        })
    }
}
