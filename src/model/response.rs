use crate::content_type;
use crate::convert;
use crate::errors::{codes, ValidationError, ValidationResults};
use crate::sample::Sampler;
use crate::schema::{CompiledSchema, SchemaValidator};
use anyhow::Context;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Status codes whose responses carry no body by definition.
const BODYLESS_STATUS_CODES: [&str; 2] = ["204", "304"];

/// A declared response header schema.
#[derive(Clone)]
pub struct ResponseHeader {
    name: String,
    definition: Value,
    compiled: Arc<CompiledSchema>,
}

impl ResponseHeader {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &Value {
        &self.definition
    }
}

/// A declared response: status code (or `default`), optional body schema,
/// header schemas, and examples.
#[derive(Clone)]
pub struct Response {
    status_code: String,
    ptr: String,
    definition: Value,
    schema: Option<Arc<CompiledSchema>>,
    headers: Vec<ResponseHeader>,
    examples: serde_json::Map<String, Value>,
    produces: Vec<String>,
    sampler: Arc<dyn Sampler>,
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status_code", &self.status_code)
            .field("ptr", &self.ptr)
            .finish()
    }
}

impl Response {
    pub(crate) fn new(
        status_code: String,
        definition: &Value,
        ptr: String,
        produces: Vec<String>,
        validator: &SchemaValidator,
        sampler: Arc<dyn Sampler>,
    ) -> anyhow::Result<Self> {
        let schema = match definition.get("schema") {
            Some(schema) => {
                let compiled = validator
                    .compile(schema)
                    .with_context(|| format!("response '{status_code}' at {ptr}"))?;
                Some(Arc::new(compiled))
            }
            None => None,
        };

        let mut headers = Vec::new();
        if let Some(declared) = definition.get("headers").and_then(Value::as_object) {
            for (name, header_definition) in declared {
                let compiled = validator.compile(header_definition).with_context(|| {
                    format!("response header '{name}' of '{status_code}' at {ptr}")
                })?;
                headers.push(ResponseHeader {
                    name: name.clone(),
                    definition: header_definition.clone(),
                    compiled: Arc::new(compiled),
                });
            }
        }

        let examples = definition
            .get("examples")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Response {
            status_code,
            ptr,
            definition: definition.clone(),
            schema,
            headers,
            examples,
            produces,
            sampler,
        })
    }

    /// Declared status code as a string, or `default`.
    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// JSON Pointer to this response's definition in the document.
    pub fn ptr(&self) -> &str {
        &self.ptr
    }

    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// The declared body schema, if any.
    pub fn schema(&self) -> Option<&Value> {
        self.schema.as_ref().map(|compiled| compiled.schema())
    }

    pub fn headers(&self) -> &[ResponseHeader] {
        &self.headers
    }

    /// The declared example for a media type.
    pub fn get_example(&self, media_type: &str) -> Option<&Value> {
        self.examples.get(media_type)
    }

    /// A plausible body value derived from the declared schema.
    pub fn get_sample(&self) -> Value {
        match &self.schema {
            Some(compiled) => self.sampler.sample(compiled.schema()),
            None => Value::Null,
        }
    }

    fn is_bodyless(&self) -> bool {
        BODYLESS_STATUS_CODES.contains(&self.status_code.as_str())
    }

    /// Validate response headers and body against this declaration.
    ///
    /// Content-Type and body checks are skipped when the response declares
    /// no schema or the declared status code is `204`/`304`. Declared
    /// headers are validated when present (case-insensitive lookup, then
    /// the header-level default); requiredness of response headers is
    /// intentionally not enforced, the Swagger 2.0 spec leaves it
    /// ambiguous.
    pub fn validate_response(
        &self,
        headers: &HashMap<String, String>,
        body: Option<&Value>,
        encoding: Option<&str>,
    ) -> ValidationResults {
        let mut results = ValidationResults::default();

        if self.schema.is_some() && !self.is_bodyless() {
            let actual = lookup_header(headers, "content-type");
            if let Err(error) = content_type::negotiate(actual, &self.produces) {
                debug!(
                    status_code = %self.status_code,
                    content_type = ?actual,
                    "Response Content-Type rejected"
                );
                results.errors.push(error);
            }
        }

        for header in &self.headers {
            if let Some(error) = self.validate_header(header, headers) {
                results.errors.push(error);
            }
        }

        if let Some(compiled) = &self.schema {
            if !self.is_bodyless() {
                if let Some(body) = body {
                    let decoded = decode_body(body, encoding);
                    let nested = compiled.validate(&decoded);
                    if !nested.is_empty() {
                        debug!(
                            status_code = %self.status_code,
                            error_count = nested.len(),
                            "Response body failed schema validation"
                        );
                        results.errors.push(ValidationError {
                            code: codes::INVALID_RESPONSE_BODY.to_string(),
                            message: "Invalid body: Value failed JSON Schema validation"
                                .to_string(),
                            path: Vec::new(),
                            location: None,
                            name: None,
                            errors: nested,
                        });
                    }
                }
            }
        }

        results
    }

    fn validate_header(
        &self,
        header: &ResponseHeader,
        headers: &HashMap<String, String>,
    ) -> Option<ValidationError> {
        let raw = lookup_header(headers, &header.name)
            .map(|value| Value::String(value.to_string()))
            .or_else(|| header.definition.get("default").cloned())?;

        let reason = match convert::coerce(&header.definition, &raw) {
            Err(failure) => ValueFailure {
                message: failure.message.clone(),
                nested: vec![ValidationError::new(failure.code, failure.message, Vec::new())],
            },
            Ok(coerced) => {
                let nested = header.compiled.validate(&coerced);
                if nested.is_empty() {
                    return None;
                }
                ValueFailure {
                    message: "Value failed JSON Schema validation".to_string(),
                    nested,
                }
            }
        };

        Some(ValidationError {
            code: codes::INVALID_RESPONSE_HEADER.to_string(),
            message: format!("Invalid header ({}): {}", header.name, reason.message),
            path: Vec::new(),
            location: None,
            name: Some(header.name.clone()),
            errors: reason.nested,
        })
    }
}

struct ValueFailure {
    message: String,
    nested: Vec<ValidationError>,
}

/// Case-insensitive header lookup, lowercase key first.
fn lookup_header<'h>(headers: &'h HashMap<String, String>, name: &str) -> Option<&'h str> {
    let lower = name.to_ascii_lowercase();
    if let Some(value) = headers.get(&lower) {
        return Some(value.as_str());
    }
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Bodies may arrive as undecoded JSON text; parse when that succeeds,
/// otherwise validate the value as supplied. The `encoding` hint exists
/// for transports handing over unconverted payloads; anything that is not
/// UTF-8-compatible text has to be decoded by the caller.
fn decode_body(body: &Value, _encoding: Option<&str>) -> Value {
    if let Value::String(text) = body {
        if let Ok(parsed) = serde_json::from_str::<Value>(text) {
            if parsed.is_object() || parsed.is_array() {
                return parsed;
            }
        }
    }
    body.clone()
}
