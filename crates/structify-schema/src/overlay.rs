//! Metadata overlay onto synthesized schemas
//!
//! Field annotations from the template's `metadata` section are merged
//! into the synthesized schema after structural transformation. Each
//! annotation targets the first schema node declaring a property with
//! the annotated name; remaining occurrences are untouched.

use crate::template::FieldMetadata;
use serde_json::{Map, Value};
use tracing::warn;

/// Merge field annotations into a synthesized schema.
///
/// Takes the schema by value and returns the patched tree; callers never
/// observe partial mutation and no schema fragment is shared.
///
/// Search order at each node: the node's own `properties` entries (in
/// declared order), then each property subtree depth-first, then
/// `items`, then `$defs`. First match wins per field.
///
/// Annotations that match no field, or that target a node which is not
/// itself a schema object, are skipped with a warning rather than
/// treated as errors.
pub fn overlay_metadata(mut schema: Value, metadata: &[(String, FieldMetadata)]) -> Value {
    for (field, attributes) in metadata {
        if !patch_first(&mut schema, field, attributes) {
            warn!("Metadata field '{}' matched nothing in the schema", field);
        }
    }
    schema
}

/// Patch the first occurrence of `field`; returns true once handled.
fn patch_first(node: &mut Value, field: &str, attributes: &FieldMetadata) -> bool {
    let Some(schema_node) = node.as_object_mut() else {
        return false;
    };

    if let Some(properties) = schema_node
        .get_mut("properties")
        .and_then(Value::as_object_mut)
    {
        if let Some(target) = properties.get_mut(field) {
            annotate(target, field, attributes);
            return true;
        }
        for child in properties.values_mut() {
            if patch_first(child, field, attributes) {
                return true;
            }
        }
    }

    if let Some(items) = schema_node.get_mut("items") {
        if patch_first(items, field, attributes) {
            return true;
        }
    }

    if let Some(defs) = schema_node.get_mut("$defs").and_then(Value::as_object_mut) {
        for definition in defs.values_mut() {
            if patch_first(definition, field, attributes) {
                return true;
            }
        }
    }

    false
}

fn annotate(target: &mut Value, field: &str, attributes: &FieldMetadata) {
    let Some(target) = target.as_object_mut() else {
        warn!(
            "Metadata for '{}' targets a non-object schema node; skipping",
            field
        );
        return;
    };

    if let Some(description) = &attributes.description {
        target.insert(
            "description".to_string(),
            Value::String(description.clone()),
        );
    }

    if let Some(values) = &attributes.allowed_values {
        target.insert("enum".to_string(), Value::Array(values.clone()));
    }

    if attributes.nullable {
        widen_nullable(target, field);
    }
}

/// Widen `type: T` to `type: [T, "null"]`.
fn widen_nullable(target: &mut Map<String, Value>, field: &str) {
    match target.get_mut("type") {
        Some(Value::String(kind)) => {
            let widened = Value::Array(vec![
                Value::String(kind.clone()),
                Value::String("null".to_string()),
            ]);
            target.insert("type".to_string(), widened);
        }
        Some(Value::Array(kinds)) => {
            if !kinds.iter().any(|k| k == "null") {
                kinds.push(Value::String("null".to_string()));
            }
        }
        _ => warn!("Cannot widen '{}' to nullable: no 'type' keyword", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesize::synthesize;
    use serde_json::json;

    fn meta(field: &str, attrs: FieldMetadata) -> Vec<(String, FieldMetadata)> {
        vec![(field.to_string(), attrs)]
    }

    #[test]
    fn test_description_merge() {
        let schema = synthesize(&json!({"title": "x"}), true);
        let patched = overlay_metadata(
            schema,
            &meta(
                "title",
                FieldMetadata {
                    description: Some("Recipe name".to_string()),
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(
            patched["properties"]["title"]["description"],
            json!("Recipe name")
        );
    }

    #[test]
    fn test_enum_merge() {
        let schema = synthesize(&json!({"difficulty": "x"}), true);
        let patched = overlay_metadata(
            schema,
            &meta(
                "difficulty",
                FieldMetadata {
                    allowed_values: Some(vec![json!("easy"), json!("hard")]),
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(
            patched["properties"]["difficulty"]["enum"],
            json!(["easy", "hard"])
        );
    }

    #[test]
    fn test_nullable_widening() {
        let schema = synthesize(&json!({"x": "string"}), true);
        let patched = overlay_metadata(
            schema,
            &meta(
                "x",
                FieldMetadata {
                    nullable: true,
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(patched["properties"]["x"]["type"], json!(["string", "null"]));
    }

    #[test]
    fn test_nullable_widening_appends_to_existing_union_once() {
        let schema = json!({
            "type": "object",
            "properties": {"x": {"type": ["string", "null"]}},
            "required": ["x"]
        });
        let patched = overlay_metadata(
            schema,
            &meta(
                "x",
                FieldMetadata {
                    nullable: true,
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(patched["properties"]["x"]["type"], json!(["string", "null"]));
    }

    #[test]
    fn test_nested_field_is_found() {
        let schema = synthesize(&json!({"author": {"name": "x"}}), true);
        let patched = overlay_metadata(
            schema,
            &meta(
                "name",
                FieldMetadata {
                    description: Some("Author name".to_string()),
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(
            patched["properties"]["author"]["properties"]["name"]["description"],
            json!("Author name")
        );
    }

    #[test]
    fn test_field_inside_array_items_is_found() {
        let schema = synthesize(&json!({"steps": [{"text": "mix"}]}), true);
        let patched = overlay_metadata(
            schema,
            &meta(
                "text",
                FieldMetadata {
                    nullable: true,
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(
            patched["properties"]["steps"]["items"]["properties"]["text"]["type"],
            json!(["string", "null"])
        );
    }

    #[test]
    fn test_first_match_wins() {
        // 'name' appears under both 'author' and 'editor'; only the first
        // declaration in property order is patched.
        let schema = synthesize(
            &json!({"author": {"name": "x"}, "editor": {"name": "x"}}),
            true,
        );
        let patched = overlay_metadata(
            schema,
            &meta(
                "name",
                FieldMetadata {
                    description: Some("patched".to_string()),
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(
            patched["properties"]["author"]["properties"]["name"]["description"],
            json!("patched")
        );
        assert!(patched["properties"]["editor"]["properties"]["name"]
            .get("description")
            .is_none());
    }

    #[test]
    fn test_unmatched_field_is_a_no_op() {
        let schema = synthesize(&json!({"title": "x"}), true);
        let patched = overlay_metadata(
            schema.clone(),
            &meta(
                "missing",
                FieldMetadata {
                    description: Some("x".to_string()),
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(patched, schema);
    }

    #[test]
    fn test_non_object_target_is_a_no_op() {
        // Boolean schemas are legal JSON-Schema; annotating one is skipped.
        let schema = json!({
            "type": "object",
            "properties": {"x": true},
            "required": ["x"]
        });
        let patched = overlay_metadata(
            schema.clone(),
            &meta(
                "x",
                FieldMetadata {
                    description: Some("x".to_string()),
                    ..FieldMetadata::default()
                },
            ),
        );
        assert_eq!(patched, schema);
    }
}
