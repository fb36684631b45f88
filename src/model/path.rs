use crate::matcher::PathTemplate;
use crate::model::operation::{Operation, OperationContext};
use crate::model::parameter::Parameter;
use crate::sample::Sampler;
use crate::schema::SchemaValidator;
use crate::spec::build;
use crate::spec::types::{escape_pointer_token, SecurityRequirement};
use serde_json::Value;
use std::sync::Arc;

/// Operations sharing one URL template, plus the path-level parameter
/// definitions they inherit.
#[derive(Debug, Clone)]
pub struct PathItem {
    path: String,
    ptr: String,
    template: Arc<PathTemplate>,
    parameters: Vec<Parameter>,
    operations: Vec<Operation>,
}

pub(crate) struct PathContext<'a> {
    pub base_path: &'a str,
    pub tolerate_trailing_slash: bool,
    pub document_consumes: &'a [String],
    pub document_produces: &'a [String],
    pub document_security: &'a [SecurityRequirement],
    pub security_definitions: &'a serde_json::Map<String, Value>,
    pub validator: &'a SchemaValidator,
    pub sampler: Arc<dyn Sampler>,
}

impl PathItem {
    pub(crate) fn new(
        path: &str,
        definition: &Value,
        ctx: &PathContext<'_>,
    ) -> anyhow::Result<Self> {
        let ptr = format!("#/paths/{}", escape_pointer_token(path));
        let template = Arc::new(PathTemplate::compile(
            ctx.base_path,
            path,
            ctx.tolerate_trailing_slash,
        )?);

        let mut parameters = Vec::new();
        if let Some(declared) = definition.get("parameters").and_then(Value::as_array) {
            for (index, parameter_definition) in declared.iter().enumerate() {
                parameters.push(Parameter::new(
                    parameter_definition,
                    format!("{ptr}/parameters/{index}"),
                    template.clone(),
                    ctx.validator,
                    ctx.sampler.clone(),
                )?);
            }
        }

        let mut operations = Vec::new();
        for method_key in build::METHODS {
            if let Some(operation_definition) = definition.get(method_key) {
                let operation_ctx = OperationContext {
                    path,
                    path_ptr: &ptr,
                    template: template.clone(),
                    path_parameters: &parameters,
                    document_consumes: ctx.document_consumes,
                    document_produces: ctx.document_produces,
                    document_security: ctx.document_security,
                    security_definitions: ctx.security_definitions,
                    validator: ctx.validator,
                    sampler: ctx.sampler.clone(),
                };
                operations.push(Operation::new(
                    method_key,
                    operation_definition,
                    &operation_ctx,
                )?);
            }
        }

        Ok(PathItem {
            path: path.to_string(),
            ptr,
            template,
            parameters,
            operations,
        })
    }

    /// The declared path template, without the base path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON Pointer to this path in the document.
    pub fn ptr(&self) -> &str {
        &self.ptr
    }

    /// The compiled matcher for `basePath + template`.
    pub fn matcher(&self) -> &PathTemplate {
        &self.template
    }

    /// True when the URL path matches this template.
    pub fn matches(&self, url_path: &str) -> bool {
        self.template.is_match(url_path)
    }

    /// Path-level parameter definitions inherited by each operation.
    pub fn get_parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Look up an operation by HTTP method, any casing.
    pub fn get_operation(&self, method: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.method().as_str().eq_ignore_ascii_case(method))
    }

    pub fn get_operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Operations whose `tags` list contains the given tag.
    pub fn get_operations_by_tag(&self, tag: &str) -> Vec<&Operation> {
        self.operations
            .iter()
            .filter(|op| op.tags().iter().any(|t| t == tag))
            .collect()
    }
}
