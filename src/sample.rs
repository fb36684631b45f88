//! Schema-driven sample values.
//!
//! Backs `get_sample()` on parameters and responses: given a schema,
//! produce a plausible value a consumer could echo back in tests or docs.
//! The sampler is injected as a trait so consumers can plug a richer
//! generator (or a deterministic one) without touching the model.

use serde_json::{Map, Value};

/// Produces an example value for a schema.
pub trait Sampler: Send + Sync {
    fn sample(&self, schema: &Value) -> Value;
}

/// Default sampler: prefers declared `example` / `default` / first `enum`
/// entry, then falls back to canned values per type.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaSampler;

impl Sampler for SchemaSampler {
    fn sample(&self, schema: &Value) -> Value {
        sample_value(schema, 0)
    }
}

const MAX_DEPTH: usize = 8;

fn sample_value(schema: &Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return Value::Null;
    }
    if let Some(example) = schema.get("example") {
        return example.clone();
    }
    if let Some(default) = schema.get("default") {
        return default.clone();
    }
    if let Some(first) = schema
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|options| options.first())
    {
        return first.clone();
    }

    match schema.get("type").and_then(Value::as_str) {
        Some("string") => sample_string(schema),
        Some("integer") => Value::from(42),
        Some("number") => Value::from(3.14),
        Some("boolean") => Value::Bool(true),
        Some("array") => {
            let item = schema
                .get("items")
                .map(|items| sample_value(items, depth + 1))
                .unwrap_or(Value::Null);
            Value::Array(vec![item])
        }
        Some("object") | None => sample_object(schema, depth),
        Some("file") => Value::String(String::new()),
        Some(_) => Value::Null,
    }
}

fn sample_string(schema: &Value) -> Value {
    let text = match schema.get("format").and_then(Value::as_str) {
        Some("date") => "2024-01-01",
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("byte") => "ZXhhbXBsZQ==",
        _ => "example",
    };
    Value::String(text.to_string())
}

fn sample_object(schema: &Value, depth: usize) -> Value {
    match schema.get("properties").and_then(Value::as_object) {
        Some(properties) => {
            let mut object = Map::new();
            for (name, property) in properties {
                object.insert(name.clone(), sample_value(property, depth + 1));
            }
            Value::Object(object)
        }
        None => {
            if let Some(items) = schema.get("items") {
                Value::Array(vec![sample_value(items, depth + 1)])
            } else {
                Value::Object(Map::new())
            }
        }
    }
}
