//! Validation error records shared across the model.
//!
//! Every validation surface in this crate reports failures as neutral
//! [`ValidationError`] records collected into a [`ValidationResults`] value.
//! Validation never aborts: a request or response with ten problems yields
//! ten records, in a deterministic order (Content-Type first, then
//! parameters in declaration order, then nested schema errors in validator
//! order).

use serde::Serialize;

/// Error codes that form the public validation contract.
pub mod codes {
    /// Actual media type is not in the declared `consumes`/`produces` set.
    pub const INVALID_CONTENT_TYPE: &str = "INVALID_CONTENT_TYPE";
    /// Envelope for a single failing request parameter.
    pub const INVALID_REQUEST_PARAMETER: &str = "INVALID_REQUEST_PARAMETER";
    /// Coercion or schema type mismatch.
    pub const INVALID_TYPE: &str = "INVALID_TYPE";
    /// A string value does not match its declared format.
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
    /// Required object property is absent.
    pub const OBJECT_MISSING_REQUIRED_PROPERTY: &str = "OBJECT_MISSING_REQUIRED_PROPERTY";
    /// No response entry matches the status code and no `default` exists.
    pub const INVALID_RESPONSE_CODE: &str = "INVALID_RESPONSE_CODE";
    /// Envelope for a failing response header.
    pub const INVALID_RESPONSE_HEADER: &str = "INVALID_RESPONSE_HEADER";
    /// Envelope for a failing response body.
    pub const INVALID_RESPONSE_BODY: &str = "INVALID_RESPONSE_BODY";
    /// A required parameter has no value after default substitution.
    pub const REQUIRED: &str = "REQUIRED";
    /// A parameter value failed JSON Schema validation (envelope reason).
    pub const SCHEMA_VALIDATION_FAILED: &str = "SCHEMA_VALIDATION_FAILED";
}

/// A single validation failure.
///
/// The `code`, `message` and `path` fields are always present. Request
/// parameter envelopes additionally carry `in` and `name` plus the nested
/// per-field `errors`; response header envelopes carry `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Stable machine-readable code, see [`codes`].
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Location of the failing value inside the validated document.
    pub path: Vec<String>,
    /// Parameter location (`body`, `query`, ...) for request-parameter envelopes.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Parameter or header name for envelope errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nested errors for envelope records.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ValidationError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        path: Vec<String>,
    ) -> Self {
        ValidationError {
            code: code.into(),
            message: message.into(),
            path,
            location: None,
            name: None,
            errors: Vec::new(),
        }
    }
}

/// Outcome of a request or response validation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResults {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationResults {
    /// True when no errors were recorded. Warnings do not affect validity.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
