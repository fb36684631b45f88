use crate::content_type;
use crate::errors::{codes, ValidationError, ValidationResults};
use crate::matcher::PathTemplate;
use crate::model::parameter::Parameter;
use crate::model::response::Response;
use crate::request::Request;
use crate::sample::Sampler;
use crate::schema::SchemaValidator;
use crate::spec::build;
use crate::spec::types::{escape_pointer_token, ParameterLocation, SecurityRequirement};
use anyhow::ensure;
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A single `(path, method)` operation with its merged parameters and
/// declared responses.
///
/// Everything an operation needs from its ancestors (effective media
/// types, security, the compiled path matcher) is computed at construction
/// and stored by value, so operations carry no parent back-references.
#[derive(Debug, Clone)]
pub struct Operation {
    method: Method,
    path: String,
    ptr: String,
    definition: Value,
    consumes: Vec<String>,
    produces: Vec<String>,
    security: Vec<SecurityRequirement>,
    security_definitions: serde_json::Map<String, Value>,
    tags: Vec<String>,
    parameters: Vec<Parameter>,
    responses: Vec<Response>,
}

pub(crate) struct OperationContext<'a> {
    pub path: &'a str,
    pub path_ptr: &'a str,
    pub template: Arc<PathTemplate>,
    pub path_parameters: &'a [Parameter],
    pub document_consumes: &'a [String],
    pub document_produces: &'a [String],
    pub document_security: &'a [SecurityRequirement],
    pub security_definitions: &'a serde_json::Map<String, Value>,
    pub validator: &'a SchemaValidator,
    pub sampler: Arc<dyn Sampler>,
}

impl Operation {
    pub(crate) fn new(
        method_key: &str,
        definition: &Value,
        ctx: &OperationContext<'_>,
    ) -> anyhow::Result<Self> {
        let method = build::parse_method(method_key)?;
        let ptr = format!("{}/{}", ctx.path_ptr, method_key);

        let consumes = build::effective_media_types(
            &build::media_types(definition, "consumes"),
            ctx.document_consumes,
        );
        let produces = build::effective_media_types(
            &build::media_types(definition, "produces"),
            ctx.document_produces,
        );
        let security = build::effective_security(
            &build::security_requirements(definition),
            ctx.document_security,
        );
        let security_definitions =
            build::referenced_security_definitions(&security, ctx.security_definitions);

        // Path-level parameters come first; an operation parameter with the
        // same (name, in) replaces the path-level one in place.
        let mut parameters = ctx.path_parameters.to_vec();
        if let Some(declared) = definition.get("parameters").and_then(Value::as_array) {
            for (index, parameter_definition) in declared.iter().enumerate() {
                let parameter_ptr = format!("{ptr}/parameters/{index}");
                let parameter = Parameter::new(
                    parameter_definition,
                    parameter_ptr,
                    ctx.template.clone(),
                    ctx.validator,
                    ctx.sampler.clone(),
                )?;
                let existing = parameters.iter().position(|p| {
                    p.name() == parameter.name() && p.location() == parameter.location()
                });
                match existing {
                    Some(position) => parameters[position] = parameter,
                    None => parameters.push(parameter),
                }
            }
        }
        let body_parameters = parameters
            .iter()
            .filter(|p| p.location() == ParameterLocation::Body)
            .count();
        ensure!(
            body_parameters <= 1,
            "operation at {ptr} declares {body_parameters} body parameters"
        );

        let mut responses = Vec::new();
        if let Some(declared) = definition.get("responses").and_then(Value::as_object) {
            for (status_code, response_definition) in declared {
                let response_ptr =
                    format!("{ptr}/responses/{}", escape_pointer_token(status_code));
                responses.push(Response::new(
                    status_code.clone(),
                    response_definition,
                    response_ptr,
                    produces.clone(),
                    ctx.validator,
                    ctx.sampler.clone(),
                )?);
            }
        }

        Ok(Operation {
            method,
            path: ctx.path.to_string(),
            ptr,
            definition: definition.clone(),
            consumes,
            produces,
            security,
            security_definitions,
            tags: build::string_list(definition.get("tags")),
            parameters,
            responses,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The owning path template (without the base path).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON Pointer to this operation in the document, e.g.
    /// `#/paths/~1pet~1{petId}/get`.
    pub fn ptr(&self) -> &str {
        &self.ptr
    }

    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// Effective `consumes`: the operation-level list when non-empty, the
    /// document-level list otherwise.
    pub fn consumes(&self) -> &[String] {
        &self.consumes
    }

    pub fn produces(&self) -> &[String] {
        &self.produces
    }

    /// Effective security requirements (document fallback applied).
    pub fn security(&self) -> &[SecurityRequirement] {
        &self.security
    }

    /// The subset of the document's security definitions referenced by
    /// this operation's effective requirements.
    pub fn security_definitions(&self) -> &serde_json::Map<String, Value> {
        &self.security_definitions
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Merged parameters: path-level first, operation-level overrides on
    /// `(name, in)` applied in place.
    pub fn get_parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Resolve a declared response: exact status-code match first, then
    /// the `default` entry. `None` asks for the `default` entry directly.
    pub fn get_response(&self, status_code: Option<u16>) -> Option<&Response> {
        let default = || self.responses.iter().find(|r| r.status_code() == "default");
        match status_code {
            Some(code) => {
                let text = code.to_string();
                self.responses
                    .iter()
                    .find(|r| r.status_code() == text)
                    .or_else(default)
            }
            None => default(),
        }
    }

    pub fn get_responses(&self) -> &[Response] {
        &self.responses
    }

    fn expects_body(&self) -> bool {
        self.parameters.iter().any(|p| {
            matches!(
                p.location(),
                ParameterLocation::Body | ParameterLocation::FormData
            )
        })
    }

    /// Validate an incoming request against this operation.
    ///
    /// Content-Type errors come first, then one envelope per failing
    /// parameter in declaration order; nested schema errors keep the
    /// validator's order.
    pub fn validate_request(&self, request: &Request) -> ValidationResults {
        let mut results = ValidationResults::default();

        if !self.consumes.is_empty() && self.expects_body() {
            if let Err(error) = content_type::negotiate(request.content_type(), &self.consumes) {
                debug!(
                    operation = %self.ptr,
                    content_type = ?request.content_type(),
                    "Request Content-Type rejected"
                );
                results.errors.push(error);
            }
        }

        for parameter in &self.parameters {
            let value = parameter.get_value(request);
            if let Some(failure) = value.error() {
                debug!(
                    operation = %self.ptr,
                    parameter = parameter.name(),
                    location = %parameter.location(),
                    code = %failure.code,
                    "Request parameter rejected"
                );
                let nested = if failure.errors.is_empty() {
                    vec![ValidationError::new(
                        failure.code.clone(),
                        failure.message.clone(),
                        failure.path.clone(),
                    )]
                } else {
                    failure.errors.clone()
                };
                results.errors.push(ValidationError {
                    code: codes::INVALID_REQUEST_PARAMETER.to_string(),
                    message: format!(
                        "Invalid parameter ({}): {}",
                        parameter.name(),
                        failure.message
                    ),
                    path: failure.path.clone(),
                    location: Some(parameter.location().to_string()),
                    name: Some(parameter.name().to_string()),
                    errors: nested,
                });
            }
        }

        results
    }

    /// Validate a response for this operation.
    ///
    /// The response entry is resolved by exact status code, then
    /// `default`; with neither present a single `INVALID_RESPONSE_CODE`
    /// error is returned.
    pub fn validate_response(
        &self,
        status_code: Option<u16>,
        headers: &HashMap<String, String>,
        body: Option<&Value>,
        encoding: Option<&str>,
    ) -> ValidationResults {
        match self.get_response(status_code) {
            Some(response) => response.validate_response(headers, body, encoding),
            None => {
                let message = match status_code {
                    Some(code) => format!(
                        "This operation does not have a defined '{code}' or 'default' \
                         response code"
                    ),
                    None => "This operation does not have a defined 'default' response code"
                        .to_string(),
                };
                let mut results = ValidationResults::default();
                results.errors.push(ValidationError::new(
                    codes::INVALID_RESPONSE_CODE,
                    message,
                    Vec::new(),
                ));
                results
            }
        }
    }
}
