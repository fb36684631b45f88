use super::types::SecurityRequirement;
use anyhow::Context;
use http::Method;
use serde_json::Value;

/// HTTP methods a path item may declare operations for.
pub const METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Normalize the document's `basePath` into a prefix usable for matching.
///
/// An absent base path and `"/"` both normalize to the empty string; a
/// trailing slash is stripped so `basePath + template` never produces `//`.
pub fn normalize_base_path(document: &Value) -> String {
    let raw = document.get("basePath").and_then(Value::as_str).unwrap_or("");
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Parse a lowercase method key from the document into an [`http::Method`].
pub fn parse_method(key: &str) -> anyhow::Result<Method> {
    Method::from_bytes(key.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method '{key}'"))
}

/// Read a declared media-type list (`consumes` or `produces`).
///
/// Returns the declared list, possibly empty. Missing fields read as empty.
pub fn media_types(definition: &Value, field: &str) -> Vec<String> {
    string_list(definition.get(field))
}

/// Operation-level media types with document-level fallback.
///
/// An empty (or absent) operation-level list falls back to the document
/// list; an empty document-level list means no media type is declared.
pub fn effective_media_types(operation: &[String], document: &[String]) -> Vec<String> {
    if operation.is_empty() {
        document.to_vec()
    } else {
        operation.to_vec()
    }
}

/// Read the `security` requirement list of a document or operation node.
pub fn security_requirements(definition: &Value) -> Vec<SecurityRequirement> {
    definition
        .get("security")
        .and_then(Value::as_array)
        .map(|reqs| {
            reqs.iter()
                .filter_map(|r| r.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Operation-level security with document-level fallback.
pub fn effective_security(
    operation: &[SecurityRequirement],
    document: &[SecurityRequirement],
) -> Vec<SecurityRequirement> {
    if operation.is_empty() {
        document.to_vec()
    } else {
        operation.to_vec()
    }
}

/// The subset of `securityDefinitions` referenced by the given requirements.
pub fn referenced_security_definitions(
    requirements: &[SecurityRequirement],
    definitions: &serde_json::Map<String, Value>,
) -> serde_json::Map<String, Value> {
    definitions
        .iter()
        .filter(|(name, _)| requirements.iter().any(|r| r.contains_key(*name)))
        .map(|(name, def)| (name.clone(), def.clone()))
        .collect()
}

pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
