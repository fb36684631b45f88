use crate::model::operation::Operation;
use crate::model::path::{PathContext, PathItem};
use crate::request::Request;
use crate::sample::{Sampler, SchemaSampler};
use crate::schema::{FormatCheck, SchemaValidator};
use crate::spec::build;
use crate::spec::types::SecurityRequirement;
use anyhow::Context;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Construction-time knobs for [`Api`].
#[derive(Default)]
pub struct ApiOptions {
    /// Accept one trailing slash when matching URLs (off by default).
    pub tolerate_trailing_slash: bool,
    /// Additional named format predicates for schema validation.
    pub formats: Vec<(String, FormatCheck)>,
    /// Replacement sampler for `get_sample()` surfaces.
    pub sampler: Option<Arc<dyn Sampler>>,
}

/// The root model built from a fully-resolved Swagger 2.0 document.
///
/// Construction walks the document once, compiling a matcher per path and
/// a validator per declared schema. The model is immutable and performs no
/// I/O afterwards: dispatch and validation are pure, so one instance can
/// serve any number of threads.
#[derive(Clone)]
pub struct Api {
    definition: Value,
    base_path: String,
    consumes: Vec<String>,
    produces: Vec<String>,
    security: Vec<SecurityRequirement>,
    security_definitions: serde_json::Map<String, Value>,
    paths: Vec<PathItem>,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("base_path", &self.base_path)
            .field("paths", &self.paths.len())
            .finish()
    }
}

impl Api {
    /// Build the model with default options.
    ///
    /// The document must be fully resolved: every `$ref` already inlined.
    pub fn from_document(document: Value) -> anyhow::Result<Self> {
        Self::with_options(document, ApiOptions::default())
    }

    /// Build the model with explicit options.
    pub fn with_options(document: Value, options: ApiOptions) -> anyhow::Result<Self> {
        let mut validator = SchemaValidator::new();
        for (name, check) in options.formats {
            validator = validator.with_format(name, check);
        }
        let sampler: Arc<dyn Sampler> = options
            .sampler
            .unwrap_or_else(|| Arc::new(SchemaSampler));

        let base_path = build::normalize_base_path(&document);
        let consumes = build::media_types(&document, "consumes");
        let produces = build::media_types(&document, "produces");
        let security = build::security_requirements(&document);
        let security_definitions = document
            .get("securityDefinitions")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let declared_paths = document
            .get("paths")
            .and_then(Value::as_object)
            .context("document has no 'paths' object")?;

        let ctx = PathContext {
            base_path: &base_path,
            tolerate_trailing_slash: options.tolerate_trailing_slash,
            document_consumes: &consumes,
            document_produces: &produces,
            document_security: &security,
            security_definitions: &security_definitions,
            validator: &validator,
            sampler: sampler.clone(),
        };

        let mut paths = Vec::with_capacity(declared_paths.len());
        for (path, definition) in declared_paths {
            if path.starts_with("x-") {
                continue;
            }
            paths.push(PathItem::new(path, definition, &ctx)?);
        }

        let operations_count: usize = paths.iter().map(|p| p.get_operations().len()).sum();
        info!(
            paths_count = paths.len(),
            operations_count = operations_count,
            base_path = %base_path,
            "API model constructed"
        );

        Ok(Api {
            definition: document,
            base_path,
            consumes,
            produces,
            security,
            security_definitions,
            paths,
        })
    }

    /// The resolved document this model was built from.
    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// Normalized base path (empty when absent or `/`).
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Document-level `consumes`.
    pub fn consumes(&self) -> &[String] {
        &self.consumes
    }

    /// Document-level `produces`.
    pub fn produces(&self) -> &[String] {
        &self.produces
    }

    /// Document-level security requirements.
    pub fn security(&self) -> &[SecurityRequirement] {
        &self.security
    }

    pub fn security_definitions(&self) -> &serde_json::Map<String, Value> {
        &self.security_definitions
    }

    pub fn get_paths(&self) -> &[PathItem] {
        &self.paths
    }

    /// Look up a path by its declared template, e.g. `/pet/{petId}`.
    pub fn get_path(&self, path: &str) -> Option<&PathItem> {
        self.paths.iter().find(|p| p.path() == path)
    }

    /// Match a request URL against the compiled path matchers.
    pub fn get_path_for_request(&self, request: &Request) -> Option<&PathItem> {
        let url_path = request.path();
        debug!(url = %request.url, path = %url_path, "Path match attempt");
        let matched = self.paths.iter().find(|p| p.matches(&url_path));
        if matched.is_none() {
            debug!(path = %url_path, "No path matched");
        }
        matched
    }

    /// Look up an operation by declared template and method.
    pub fn get_operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.get_path(path)?.get_operation(method)
    }

    /// Dispatch: locate the operation serving a request, by URL and method.
    ///
    /// A URL that matches a path whose operation map lacks the request
    /// method yields `None`.
    pub fn get_operation_for_request(&self, request: &Request) -> Option<&Operation> {
        let path = self.get_path_for_request(request)?;
        let operation = path.get_operation(&request.method);
        match operation {
            Some(op) => debug!(
                method = %request.method,
                url = %request.url,
                operation = %op.ptr(),
                "Operation matched"
            ),
            None => debug!(
                method = %request.method,
                url = %request.url,
                path = %path.path(),
                "Path matched but method not declared"
            ),
        }
        operation
    }

    /// All operations across all paths, in path order.
    pub fn get_operations(&self) -> Vec<&Operation> {
        self.paths
            .iter()
            .flat_map(|p| p.get_operations().iter())
            .collect()
    }

    /// All operations whose `tags` list contains the given tag.
    pub fn get_operations_by_tag(&self, tag: &str) -> Vec<&Operation> {
        self.paths
            .iter()
            .flat_map(|p| p.get_operations_by_tag(tag))
            .collect()
    }
}
