//! Loose argument validation against a function's parameter schema.
//!
//! This is not a JSON Schema implementation. It checks what the model most
//! often gets wrong: unparseable JSON, missing required properties, wrong
//! primitive types and values outside an `enum`.

use brain_core::FunctionSpec;
use serde_json::{Map, Value};

/// Parse and loosely validate a raw argument string.
///
/// An empty or whitespace-only string is treated as `{}`.
pub fn parse_arguments(spec: &FunctionSpec, raw: &str) -> Result<Map<String, Value>, String> {
    let raw = raw.trim();
    let value: Value = if raw.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(raw).map_err(|e| format!("arguments are not valid JSON: {}", e))?
    };

    let Value::Object(args) = value else {
        return Err(format!("arguments must be a JSON object, got {}", type_name(&value)));
    };

    for required in spec.required() {
        if !args.contains_key(required) {
            return Err(format!("missing required argument: {}", required));
        }
    }

    if let Some(properties) = spec.parameters().get("properties").and_then(Value::as_object) {
        for (key, value) in &args {
            if let Some(property) = properties.get(key) {
                check_property(key, property, value)?;
            }
        }
    }

    Ok(args)
}

fn check_property(key: &str, property: &Value, value: &Value) -> Result<(), String> {
    if let Some(expected) = property.get("type").and_then(Value::as_str) {
        if !matches_type(expected, value) {
            return Err(format!(
                "argument '{}' should be {}, got {}",
                key,
                expected,
                type_name(value)
            ));
        }
    }

    if let Some(allowed) = property.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            return Err(format!("argument '{}' must be one of {}", key, Value::Array(allowed.clone())));
        }
    }

    Ok(())
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unfamiliar type keywords are not enforced.
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
