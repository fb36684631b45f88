use anyhow::Context;
use serde_json::Value;
use std::path::Path;

/// Parse a YAML or JSON document string into a raw value tree.
///
/// JSON is attempted first; anything that fails JSON parsing is handed to
/// the YAML parser (YAML is a superset of JSON, so this only changes which
/// error surfaces for malformed input).
pub fn parse_document(content: &str) -> anyhow::Result<Value> {
    if let Ok(value) = serde_json::from_str(content) {
        return Ok(value);
    }
    serde_yaml::from_str(content).context("document is neither valid JSON nor valid YAML")
}

/// Load a resolved Swagger document from a file.
///
/// The format is chosen by extension (`.yaml`/`.yml` parse as YAML,
/// everything else as JSON). The returned tree is what
/// [`crate::Api::from_document`] consumes; external `$ref` resolution is
/// the caller's job and must already have happened.
pub fn load_document(path: impl AsRef<Path>) -> anyhow::Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);
    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_json() {
        let doc = parse_document(r#"{"swagger": "2.0", "paths": {}}"#).unwrap();
        assert_eq!(doc["swagger"], "2.0");
    }

    #[test]
    fn test_parse_document_yaml() {
        let doc = parse_document("swagger: '2.0'\npaths: {}\n").unwrap();
        assert_eq!(doc["swagger"], "2.0");
    }
}
