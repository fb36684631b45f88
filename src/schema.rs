//! # Schema Validator Adapter
//!
//! Wraps the `jsonschema` crate behind a small adapter so the rest of the
//! model deals in neutral `{code, message, path}` records. Schemas are
//! compiled once at model construction and shared read-only afterwards
//! (validation itself is pure), so a single API instance is safe to use
//! from any number of threads.
//!
//! Swagger 2.0 embeds JSON Schema draft-4, so compilation is pinned to
//! that dialect. The adapter carries a format registry seeded with the
//! Swagger primitive formats (`date`, `date-time`, `byte`, `int32`,
//! `int64`, `float`, `double`, `password`); consumers can register
//! additional predicates through [`crate::ApiOptions`].

use crate::errors::{codes, ValidationError};
use crate::spec::types::json_type_name;
use anyhow::anyhow;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate};
use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

/// A named format predicate applied to string instances.
pub type FormatCheck = fn(&str) -> bool;

fn check_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn check_date_time(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

fn check_byte(value: &str) -> bool {
    BASE64.decode(value).is_ok()
}

fn check_int32(value: &str) -> bool {
    value.parse::<i32>().is_ok()
}

fn check_int64(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}

fn check_float(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

fn opaque(_value: &str) -> bool {
    true
}

/// Compiles schemas with a fixed draft and a custom-format registry.
pub struct SchemaValidator {
    formats: Vec<(String, FormatCheck)>,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator {
    /// A validator seeded with the Swagger 2.0 format registry.
    pub fn new() -> Self {
        let formats: Vec<(String, FormatCheck)> = vec![
            ("date".to_string(), check_date as FormatCheck),
            ("date-time".to_string(), check_date_time),
            ("byte".to_string(), check_byte),
            ("int32".to_string(), check_int32),
            ("int64".to_string(), check_int64),
            ("float".to_string(), check_float),
            ("double".to_string(), check_float),
            ("password".to_string(), opaque),
            ("binary".to_string(), opaque),
        ];
        SchemaValidator { formats }
    }

    /// Register an additional named format predicate.
    pub fn with_format(mut self, name: impl Into<String>, check: FormatCheck) -> Self {
        self.formats.push((name.into(), check));
        self
    }

    /// Compile a schema once for repeated validation.
    pub fn compile(&self, schema: &Value) -> anyhow::Result<CompiledSchema> {
        let mut options = JSONSchema::options();
        options.with_draft(Draft::Draft4);
        for (name, check) in &self.formats {
            let name: &'static str = Box::leak(name.clone().into_boxed_str());
            options.with_format(name, *check);
        }
        let compiled = options
            .compile(schema)
            .map_err(|err| anyhow!("schema failed to compile: {err}"))?;
        Ok(CompiledSchema {
            schema: schema.clone(),
            compiled,
        })
    }
}

/// A schema compiled by [`SchemaValidator::compile`].
pub struct CompiledSchema {
    schema: Value,
    compiled: JSONSchema,
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("schema", &self.schema)
            .finish()
    }
}

impl CompiledSchema {
    /// The raw schema this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validate a value, returning neutral error records.
    ///
    /// The ordering of the underlying validator's errors is preserved.
    pub fn validate(&self, value: &Value) -> Vec<ValidationError> {
        match self.compiled.validate(value) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|err| error_record(&err)).collect(),
        }
    }
}

fn error_record(err: &jsonschema::ValidationError<'_>) -> ValidationError {
    let (code, message) = match &err.kind {
        ValidationErrorKind::Required { property } => (
            codes::OBJECT_MISSING_REQUIRED_PROPERTY,
            format!("Missing required property: {}", value_text(property)),
        ),
        ValidationErrorKind::Type { kind } => (
            codes::INVALID_TYPE,
            format!(
                "Expected type {} but found type {}",
                expected_types(kind),
                json_type_name(&err.instance)
            ),
        ),
        ValidationErrorKind::Format { format } => (
            codes::INVALID_FORMAT,
            format!("Value does not match format '{format}'"),
        ),
        ValidationErrorKind::Enum { .. } => ("ENUM_MISMATCH", err.to_string()),
        ValidationErrorKind::AdditionalProperties { .. } => {
            ("OBJECT_ADDITIONAL_PROPERTIES", err.to_string())
        }
        ValidationErrorKind::Minimum { .. } => ("MINIMUM", err.to_string()),
        ValidationErrorKind::Maximum { .. } => ("MAXIMUM", err.to_string()),
        ValidationErrorKind::ExclusiveMinimum { .. } => ("MINIMUM_EXCLUSIVE", err.to_string()),
        ValidationErrorKind::ExclusiveMaximum { .. } => ("MAXIMUM_EXCLUSIVE", err.to_string()),
        ValidationErrorKind::MinLength { .. } => ("MIN_LENGTH", err.to_string()),
        ValidationErrorKind::MaxLength { .. } => ("MAX_LENGTH", err.to_string()),
        ValidationErrorKind::MinItems { .. } => ("ARRAY_LENGTH_SHORT", err.to_string()),
        ValidationErrorKind::MaxItems { .. } => ("ARRAY_LENGTH_LONG", err.to_string()),
        ValidationErrorKind::Pattern { .. } => ("PATTERN", err.to_string()),
        ValidationErrorKind::MultipleOf { .. } => ("MULTIPLE_OF", err.to_string()),
        _ => ("INVALID_VALUE", err.to_string()),
    };
    ValidationError::new(code, message, pointer_segments(&err.instance_path.to_string()))
}

fn expected_types(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Single(ty) => ty.to_string(),
        TypeKind::Multiple(types) => {
            let names: Vec<String> = (*types).into_iter().map(|t| t.to_string()).collect();
            names.join(", ")
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Split a JSON Pointer rendering (`/a/0/b`) into unescaped segments.
fn pointer_segments(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .split('/')
        .skip(1)
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect()
}
