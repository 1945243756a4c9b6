//! Template shape to JSON-Schema transformation

use serde_json::{json, Map, Value};

/// Convert an example shape into a JSON-Schema node.
///
/// The transform is structural and deterministic: the same shape always
/// yields a deeply equal schema, with `properties` and `required` in the
/// shape's own key order.
///
/// - Objects become closed schemas: every template field is required,
///   and in strict mode `additionalProperties` is `false`.
/// - Arrays infer their item schema from the first element only;
///   template arrays are assumed homogeneous. An empty array defaults
///   its items to `{"type": "string"}`.
/// - Scalars map by JSON kind: string, integer, number, boolean, null.
/// - An object of the form `{"$ref": "#/$defs/name"}` passes through as
///   a reference node, so definitions attached by [`crate::attach_defs`]
///   can be reused.
///
/// Recursion depth is bounded by the depth guard, which callers run on
/// the template before synthesis.
pub fn synthesize(shape: &Value, strict: bool) -> Value {
    match shape {
        Value::Object(fields) => {
            if let Some(reference) = as_reference(fields) {
                return json!({ "$ref": reference });
            }

            let mut properties = Map::new();
            let mut required = Vec::with_capacity(fields.len());
            for (key, value) in fields {
                properties.insert(key.clone(), synthesize(value, strict));
                required.push(Value::String(key.clone()));
            }

            let mut node = Map::new();
            node.insert("type".to_string(), json!("object"));
            node.insert("properties".to_string(), Value::Object(properties));
            node.insert("required".to_string(), Value::Array(required));
            if strict {
                node.insert("additionalProperties".to_string(), json!(false));
            }
            Value::Object(node)
        }
        Value::Array(items) => {
            let item_schema = match items.first() {
                Some(first) => synthesize(first, strict),
                None => json!({"type": "string"}),
            };
            json!({"type": "array", "items": item_schema})
        }
        Value::String(_) => json!({"type": "string"}),
        Value::Number(n) if n.is_f64() => json!({"type": "number"}),
        Value::Number(_) => json!({"type": "integer"}),
        Value::Bool(_) => json!({"type": "boolean"}),
        Value::Null => json!({"type": "null"}),
    }
}

/// A single-key `{"$ref": "..."}` object is a reference, not a shape.
fn as_reference(fields: &Map<String, Value>) -> Option<&str> {
    if fields.len() == 1 {
        fields.get("$ref").and_then(Value::as_str)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(synthesize(&json!("x"), true), json!({"type": "string"}));
        assert_eq!(synthesize(&json!(3), true), json!({"type": "integer"}));
        assert_eq!(synthesize(&json!(3.5), true), json!({"type": "number"}));
        assert_eq!(synthesize(&json!(true), true), json!({"type": "boolean"}));
        assert_eq!(synthesize(&json!(null), true), json!({"type": "null"}));
    }

    #[test]
    fn test_object_is_closed_world() {
        let schema = synthesize(&json!({"title": "x", "count": 1}), true);
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "title": {"type": "string"},
                    "count": {"type": "integer"}
                },
                "required": ["title", "count"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn test_required_mirrors_property_order() {
        let schema = synthesize(&json!({"b": 1, "a": 1, "c": 1}), true);
        assert_eq!(schema["required"], json!(["b", "a", "c"]));
        let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_nested_objects() {
        let schema = synthesize(&json!({"author": {"name": "x"}}), true);
        assert_eq!(
            schema["properties"]["author"],
            json!({
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "required": ["name"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn test_array_samples_first_element() {
        let schema = synthesize(&json!({"steps": ["mix"]}), true);
        assert_eq!(
            schema["properties"]["steps"],
            json!({"type": "array", "items": {"type": "string"}})
        );

        // First element wins; later elements are not consulted.
        let schema = synthesize(&json!(["mix", 42]), true);
        assert_eq!(schema, json!({"type": "array", "items": {"type": "string"}}));
    }

    #[test]
    fn test_empty_array_defaults_to_string_items() {
        let schema = synthesize(&json!([]), true);
        assert_eq!(schema, json!({"type": "array", "items": {"type": "string"}}));
    }

    #[test]
    fn test_array_of_objects() {
        let schema = synthesize(&json!([{"name": "x", "amount": 2}]), true);
        assert_eq!(schema["items"]["required"], json!(["name", "amount"]));
        assert_eq!(schema["items"]["additionalProperties"], json!(false));
    }

    #[test]
    fn test_permissive_mode_leaves_objects_open() {
        let schema = synthesize(&json!({"title": "x"}), false);
        assert!(schema.get("additionalProperties").is_none());
        assert_eq!(schema["required"], json!(["title"]));
    }

    #[test]
    fn test_reference_passthrough() {
        let schema = synthesize(&json!({"main": {"$ref": "#/$defs/ingredient"}}), true);
        assert_eq!(
            schema["properties"]["main"],
            json!({"$ref": "#/$defs/ingredient"})
        );
    }

    #[test]
    fn test_ref_key_with_siblings_is_a_shape() {
        // Only a single-key object is treated as a reference.
        let schema = synthesize(&json!({"$ref": "x", "other": 1}), true);
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["required"], json!(["$ref", "other"]));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let shape = json!({
            "title": "x",
            "servings": 4,
            "steps": [{"text": "mix", "minutes": 5.0}]
        });
        assert_eq!(synthesize(&shape, true), synthesize(&shape, true));
    }
}
