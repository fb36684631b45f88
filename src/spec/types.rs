use serde_json::Value;

/// Location where a parameter can be found in an HTTP request
///
/// Corresponds to the Swagger 2.0 `in` field for parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    /// Request body (at most one per operation)
    Body,
    /// Form field in a `application/x-www-form-urlencoded` or multipart body
    FormData,
    /// Query string parameter (e.g., `?limit=10`)
    Query,
    /// HTTP header parameter
    Header,
    /// Path parameter (e.g., `/pet/{petId}`)
    Path,
}

impl ParameterLocation {
    /// The wire spelling used by the document (`body`, `formData`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "body" => Some(ParameterLocation::Body),
            "formData" => Some(ParameterLocation::FormData),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "path" => Some(ParameterLocation::Path),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialization style for array-typed non-body parameters.
///
/// Determines the delimiter used to split the raw wire string before
/// per-element coercion. `multi` means the transport already delivered a
/// list (repeated query/form keys), so no splitting happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollectionFormat {
    /// Comma separated values (the Swagger default)
    #[default]
    Csv,
    /// Space separated values
    Ssv,
    /// Tab separated values
    Tsv,
    /// Pipe separated values
    Pipes,
    /// Repeated keys; the caller supplies an already-split list
    Multi,
}

impl CollectionFormat {
    /// Read the `collectionFormat` field of a parameter definition,
    /// defaulting to `csv` when absent or unrecognized.
    pub fn from_definition(definition: &Value) -> Self {
        match definition.get("collectionFormat").and_then(Value::as_str) {
            Some("ssv") => CollectionFormat::Ssv,
            Some("tsv") => CollectionFormat::Tsv,
            Some("pipes") => CollectionFormat::Pipes,
            Some("multi") => CollectionFormat::Multi,
            _ => CollectionFormat::Csv,
        }
    }

    /// The split delimiter, or `None` for `multi`.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            CollectionFormat::Csv => Some(','),
            CollectionFormat::Ssv => Some(' '),
            CollectionFormat::Tsv => Some('\t'),
            CollectionFormat::Pipes => Some('|'),
            CollectionFormat::Multi => None,
        }
    }
}

/// A single security requirement: scheme name mapped to the required scopes.
///
/// Kept in raw JSON form so consumers can compare it against the document
/// verbatim.
pub type SecurityRequirement = serde_json::Map<String, Value>;

/// JSON type name of a value as it appears in validation messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Escape a single reference token per RFC 6901 (`~` -> `~0`, `/` -> `~1`).
pub fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pointer_escaping() {
        assert_eq!(escape_pointer_token("/pet/{petId}"), "~1pet~1{petId}");
        assert_eq!(escape_pointer_token("a~b"), "a~0b");
    }

    #[test]
    fn test_collection_format_default() {
        assert_eq!(
            CollectionFormat::from_definition(&json!({})),
            CollectionFormat::Csv
        );
        assert_eq!(
            CollectionFormat::from_definition(&json!({"collectionFormat": "pipes"})),
            CollectionFormat::Pipes
        );
        assert_eq!(CollectionFormat::Multi.delimiter(), None);
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(1)), "integer");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!(null)), "null");
    }
}
