//! Argument validation against a tool's JSON input schema.
//!
//! Only the subset of JSON Schema that `schemars` emits for flat parameter
//! structs is understood: `type`, `required`, `properties`, `enum`, `const`,
//! `oneOf`/`anyOf` of constants, `nullable`, and local `$ref` pointers.
//! Every offending field is reported, not just the first one.

use serde_json::{Map, Value};

use super::error::FieldIssue;

/// Field name used when the arguments value itself is malformed.
pub const ROOT_FIELD: &str = "<root>";

/// Validate `arguments` against the object schema `schema`.
///
/// Returns the list of issues; an empty list means the arguments are valid.
pub fn validate_arguments(schema: &Map<String, Value>, arguments: &Value) -> Vec<FieldIssue> {
    let Some(args) = arguments.as_object() else {
        return vec![FieldIssue::new(
            ROOT_FIELD,
            format!("expected object, got {}", json_type_name(arguments)),
        )];
    };

    let mut issues = Vec::new();

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if !args.contains_key(field) {
                issues.push(FieldIssue::new(field, "is required"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (field, property) in properties {
            let Some(value) = args.get(field) else {
                continue;
            };
            let property = resolve_ref(schema, property);
            if let Some(problem) = check_value(schema, property, value) {
                issues.push(FieldIssue::new(field.as_str(), problem));
            }
        }
    }

    issues
}

/// Follow a local `$ref` (e.g. `#/$defs/Operation`) to its definition.
fn resolve_ref<'a>(root: &'a Map<String, Value>, property: &'a Value) -> &'a Value {
    let Some(pointer) = property
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.strip_prefix('#'))
    else {
        return property;
    };

    let mut segments = pointer.split('/').filter(|s| !s.is_empty());
    let Some(first) = segments.next() else {
        return property;
    };
    let mut node = root.get(first);
    for segment in segments {
        node = node.and_then(|n| n.get(segment));
    }
    node.unwrap_or(property)
}

fn check_value(root: &Map<String, Value>, property: &Value, value: &Value) -> Option<String> {
    if value.is_null() && property.get("nullable").and_then(Value::as_bool) == Some(true) {
        return None;
    }

    if let Some(expected) = property.get("type") {
        let matches = match expected {
            Value::String(ty) => type_matches(ty, value),
            Value::Array(types) => types
                .iter()
                .filter_map(Value::as_str)
                .any(|ty| type_matches(ty, value)),
            _ => true,
        };
        if !matches {
            return Some(format!(
                "expected {}, got {}",
                describe_type(expected),
                json_type_name(value)
            ));
        }
    }

    let allowed = allowed_values(root, property);
    if !allowed.is_empty() && !allowed.contains(&value) {
        let choices = allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Some(format!("must be one of [{}], got {}", choices, value));
    }

    None
}

/// Collect the constant values a property is restricted to, if any.
fn allowed_values<'a>(root: &'a Map<String, Value>, property: &'a Value) -> Vec<&'a Value> {
    if let Some(values) = property.get("enum").and_then(Value::as_array) {
        return values.iter().collect();
    }
    if let Some(value) = property.get("const") {
        return vec![value];
    }
    for key in ["oneOf", "anyOf"] {
        if let Some(variants) = property.get(key).and_then(Value::as_array) {
            return variants
                .iter()
                .map(|variant| resolve_ref(root, variant))
                .flat_map(|variant| allowed_values(root, variant))
                .collect();
        }
    }
    Vec::new()
}

fn type_matches(ty: &str, value: &Value) -> bool {
    match ty {
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn describe_type(expected: &Value) -> String {
    match expected {
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.as_str().unwrap_or("value").to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
