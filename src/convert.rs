//! Wire-value coercion.
//!
//! Non-body parameters arrive as strings (path segments, query values,
//! headers, form fields). [`coerce`] converts those strings into the typed
//! JSON value the declared schema expects, so schema validation operates
//! on real types instead of wire text. Values that already carry the right
//! type pass through unchanged.

use crate::spec::types::{json_type_name, CollectionFormat};
use chrono::{DateTime, NaiveDate};
use serde_json::{Number, Value};

/// A failed conversion. Carries the same `{code, message}` vocabulary as
/// schema validation so callers can wrap it uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct CoerceError {
    pub code: String,
    pub message: String,
}

impl CoerceError {
    fn invalid_type(expected: &str, raw: &Value) -> Self {
        CoerceError {
            code: crate::errors::codes::INVALID_TYPE.to_string(),
            message: format!(
                "Expected type {expected} but found type {}",
                json_type_name(raw)
            ),
        }
    }
}

/// Coerce an optional raw value, substituting the schema default when the
/// raw value is absent. An absent value with no default stays absent.
pub fn coerce_optional(
    schema: &Value,
    raw: Option<&Value>,
) -> Result<Option<Value>, CoerceError> {
    match raw {
        Some(value) => coerce(schema, value).map(Some),
        None => Ok(schema.get("default").cloned()),
    }
}

/// Convert a raw wire value into the type the schema declares.
///
/// Unknown or absent `type` passes the raw value through untouched;
/// validation is then purely schema-driven.
pub fn coerce(schema: &Value, raw: &Value) -> Result<Value, CoerceError> {
    match schema.get("type").and_then(Value::as_str) {
        Some("integer") => coerce_integer(raw),
        Some("number") => coerce_number(raw),
        Some("boolean") => coerce_boolean(raw),
        Some("string") => coerce_string(schema, raw),
        Some("array") => coerce_array(schema, raw),
        Some("object") => Ok(coerce_object(raw)),
        Some("file") => Ok(raw.clone()),
        _ => Ok(raw.clone()),
    }
}

fn coerce_integer(raw: &Value) -> Result<Value, CoerceError> {
    match raw {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(raw.clone()),
        Value::String(s) => {
            if let Ok(i) = s.parse::<i64>() {
                Ok(Value::Number(Number::from(i)))
            } else if let Ok(u) = s.parse::<u64>() {
                Ok(Value::Number(Number::from(u)))
            } else {
                Err(CoerceError::invalid_type("integer", raw))
            }
        }
        _ => Err(CoerceError::invalid_type("integer", raw)),
    }
}

fn coerce_number(raw: &Value) -> Result<Value, CoerceError> {
    match raw {
        Value::Number(_) => Ok(raw.clone()),
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| CoerceError::invalid_type("number", raw)),
        _ => Err(CoerceError::invalid_type("number", raw)),
    }
}

fn coerce_boolean(raw: &Value) -> Result<Value, CoerceError> {
    match raw {
        Value::Bool(_) => Ok(raw.clone()),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
        _ => Err(CoerceError::invalid_type("boolean", raw)),
    }
}

/// Strings pass through. `date`/`date-time` formats are parse-checked here
/// so typed timestamps can be derived later, but the wire string remains
/// the coerced value; an unparseable date flows through for the schema's
/// format validator to report.
fn coerce_string(schema: &Value, raw: &Value) -> Result<Value, CoerceError> {
    match raw {
        Value::String(s) => {
            match schema.get("format").and_then(Value::as_str) {
                Some("date") => {
                    let _ = NaiveDate::parse_from_str(s, "%Y-%m-%d");
                }
                Some("date-time") => {
                    let _ = DateTime::parse_from_rfc3339(s);
                }
                _ => {}
            }
            Ok(raw.clone())
        }
        _ => Err(CoerceError::invalid_type("string", raw)),
    }
}

fn coerce_array(schema: &Value, raw: &Value) -> Result<Value, CoerceError> {
    let items = schema.get("items").cloned().unwrap_or(Value::Null);
    let format = CollectionFormat::from_definition(schema);
    let elements: Vec<Value> = match raw {
        Value::Array(values) => values.clone(),
        Value::String(s) => match format.delimiter() {
            Some(delimiter) => s
                .split(delimiter)
                .map(|part| Value::String(part.to_string()))
                .collect(),
            // multi: the transport should have supplied a list already; a
            // lone string is treated as a single-element list.
            None => vec![raw.clone()],
        },
        _ => return Err(CoerceError::invalid_type("array", raw)),
    };
    let coerced = elements
        .iter()
        .map(|element| {
            if items.is_null() {
                Ok(element.clone())
            } else {
                coerce(&items, element)
            }
        })
        .collect::<Result<Vec<Value>, CoerceError>>()?;
    Ok(Value::Array(coerced))
}

/// Objects may arrive as undecoded JSON text (request/response bodies in
/// wire form); anything else passes through for schema-driven validation.
fn coerce_object(raw: &Value) -> Value {
    if let Value::String(s) = raw {
        if let Ok(parsed @ Value::Object(_)) = serde_json::from_str::<Value>(s) {
            return parsed;
        }
    }
    raw.clone()
}
