use crate::convert;
use crate::errors::{codes, ValidationError};
use crate::matcher::PathTemplate;
use crate::request::Request;
use crate::sample::Sampler;
use crate::schema::{CompiledSchema, SchemaValidator};
use crate::spec::types::{CollectionFormat, ParameterLocation};
use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{json, Value};
use std::sync::Arc;

/// Schema-bearing fields copied from a non-body parameter definition into
/// its effective schema. Body parameters carry a full `schema` object
/// instead.
const NON_BODY_SCHEMA_FIELDS: [&str; 17] = [
    "type",
    "format",
    "items",
    "collectionFormat",
    "default",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    "maxItems",
    "minItems",
    "uniqueItems",
    "enum",
    "multipleOf",
];

/// A declared request parameter.
///
/// Owns its effective schema (precompiled) and a shared handle to the
/// owning path's matcher so path-typed parameters can extract their
/// segment from a request URL.
#[derive(Clone)]
pub struct Parameter {
    name: String,
    location: ParameterLocation,
    required: bool,
    ptr: String,
    definition: Value,
    schema: Value,
    collection_format: CollectionFormat,
    compiled: Arc<CompiledSchema>,
    template: Arc<PathTemplate>,
    sampler: Arc<dyn Sampler>,
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("required", &self.required)
            .field("ptr", &self.ptr)
            .finish()
    }
}

impl Parameter {
    pub(crate) fn new(
        definition: &Value,
        ptr: String,
        template: Arc<PathTemplate>,
        validator: &SchemaValidator,
        sampler: Arc<dyn Sampler>,
    ) -> anyhow::Result<Self> {
        let name = definition
            .get("name")
            .and_then(Value::as_str)
            .with_context(|| format!("parameter at {ptr} has no name"))?
            .to_string();
        let location = definition
            .get("in")
            .and_then(Value::as_str)
            .and_then(ParameterLocation::parse)
            .with_context(|| format!("parameter '{name}' at {ptr} has no valid 'in' field"))?;

        // Path parameters are always required per the Swagger 2.0 spec.
        let required = location == ParameterLocation::Path
            || definition
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false);

        let schema = if location == ParameterLocation::Body {
            definition.get("schema").cloned().unwrap_or_else(|| json!({}))
        } else {
            let mut extracted = serde_json::Map::new();
            for field in NON_BODY_SCHEMA_FIELDS {
                if let Some(value) = definition.get(field) {
                    extracted.insert(field.to_string(), value.clone());
                }
            }
            Value::Object(extracted)
        };

        // `file` is a Swagger extension draft-4 does not know; such payloads
        // are opaque to schema validation.
        let compile_target = if schema.get("type").and_then(Value::as_str) == Some("file") {
            json!({})
        } else {
            schema.clone()
        };
        let compiled = validator
            .compile(&compile_target)
            .with_context(|| format!("parameter '{name}' at {ptr}"))?;

        Ok(Parameter {
            name,
            location,
            required,
            ptr,
            collection_format: CollectionFormat::from_definition(&schema),
            definition: definition.clone(),
            schema,
            compiled: Arc::new(compiled),
            template,
            sampler,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> ParameterLocation {
        self.location
    }

    pub fn required(&self) -> bool {
        self.required
    }

    /// JSON Pointer to this parameter's definition in the document.
    pub fn ptr(&self) -> &str {
        &self.ptr
    }

    /// The raw parameter definition as written in the document.
    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// The effective schema: the `schema` field for body parameters, the
    /// extracted type fields for everything else.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn collection_format(&self) -> CollectionFormat {
        self.collection_format
    }

    /// A plausible example value for this parameter.
    pub fn get_sample(&self) -> Value {
        self.sampler.sample(&self.schema)
    }

    /// Read, coerce, and validate this parameter's value from a request.
    pub fn get_value<'p>(&'p self, request: &Request) -> ParameterValue<'p> {
        ParameterValue::new(self, self.raw_value(request))
    }

    fn raw_value(&self, request: &Request) -> Option<Value> {
        match self.location {
            ParameterLocation::Body => request.body.clone(),
            ParameterLocation::FormData => {
                if self.schema.get("type").and_then(Value::as_str) == Some("file") {
                    request.files.get(&self.name).cloned()
                } else {
                    request
                        .body
                        .as_ref()
                        .and_then(|body| body.get(&self.name))
                        .cloned()
                }
            }
            ParameterLocation::Query => request.query.get(&self.name).cloned(),
            ParameterLocation::Header => request
                .header_value(&self.name)
                .map(|value| Value::String(value.to_string())),
            ParameterLocation::Path => {
                let captures = self.template.exec(&request.path())?;
                let index = self.template.param_index(&self.name)?;
                captures.get(index).cloned().map(Value::String)
            }
        }
    }
}

/// Why a parameter value is invalid: a coercion failure or the nested
/// schema-validation errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueError {
    pub code: String,
    pub message: String,
    pub path: Vec<String>,
    /// Schema-validation errors, unmodified, for envelope re-wrapping.
    pub errors: Vec<ValidationError>,
}

/// A parameter's value as read from one request.
///
/// Produced on demand by [`Parameter::get_value`]; never stored in the
/// model.
#[derive(Debug, Clone)]
pub struct ParameterValue<'p> {
    parameter: &'p Parameter,
    raw: Option<Value>,
    value: Option<Value>,
    error: Option<ValueError>,
}

impl<'p> ParameterValue<'p> {
    fn new(parameter: &'p Parameter, raw: Option<Value>) -> Self {
        let had_raw = raw.is_some();
        let mut value = None;
        let mut error = None;

        match convert::coerce_optional(&parameter.schema, raw.as_ref()) {
            Err(failure) => {
                error = Some(ValueError {
                    code: failure.code,
                    message: failure.message,
                    path: Vec::new(),
                    errors: Vec::new(),
                });
            }
            Ok(coerced) => match coerced {
                None if parameter.required => {
                    error = Some(ValueError {
                        code: codes::REQUIRED.to_string(),
                        message: "Value is required but was not provided".to_string(),
                        path: Vec::new(),
                        errors: Vec::new(),
                    });
                }
                Some(coerced_value) => {
                    // Schema validation runs when the parameter is required
                    // or a raw value was actually supplied; a defaulted
                    // optional parameter is accepted as declared.
                    if parameter.required || had_raw {
                        let nested = parameter.compiled.validate(&coerced_value);
                        if !nested.is_empty() {
                            error = Some(ValueError {
                                code: codes::SCHEMA_VALIDATION_FAILED.to_string(),
                                message: "Value failed JSON Schema validation".to_string(),
                                path: Vec::new(),
                                errors: nested,
                            });
                        }
                    }
                    value = Some(coerced_value);
                }
                None => {}
            },
        }

        ParameterValue {
            parameter,
            raw,
            value,
            error,
        }
    }

    pub fn parameter(&self) -> &Parameter {
        self.parameter
    }

    /// The request-side value before coercion, if one was supplied.
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    /// The coerced value (default substituted when the raw was absent).
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&ValueError> {
        self.error.as_ref()
    }

    /// The value as a typed timestamp, for `date`/`date-time` parameters.
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let text = self.value.as_ref()?.as_str()?;
        match self.parameter.schema.get("format").and_then(Value::as_str) {
            Some("date-time") => DateTime::parse_from_rfc3339(text).ok(),
            Some("date") => {
                let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
                let midnight = date.and_hms_opt(0, 0, 0)?;
                Some(DateTime::from_naive_utc_and_offset(
                    midnight,
                    FixedOffset::east_opt(0)?,
                ))
            }
            _ => None,
        }
    }
}
