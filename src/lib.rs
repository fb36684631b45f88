//! Navigable runtime model and validation engine for resolved Swagger 2.0
//! API documents.
//!
//! Given a fully-resolved document (every `$ref` already inlined), the
//! crate builds an in-memory model of the API's paths, operations,
//! parameters, and responses, and offers two runtime services on top:
//!
//! - **Request dispatch and validation**: match `(url, method)` to an
//!   operation, then validate Content-Type and every declared parameter
//!   against its schema.
//! - **Response validation**: check a status code, headers, and body
//!   against the operation's declared response.
//!
//! The model is stateless after construction: no caches, no I/O, no
//! mutation. Validation always returns a [`ValidationResults`] value
//! rather than failing, with errors in a deterministic order.
//!
//! ```no_run
//! use swagmodel::{Api, Request};
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = swagmodel::spec::load_document("swagger.json")?;
//! let api = Api::from_document(document)?;
//!
//! let mut request = Request::new("post", "/v2/pet");
//! request
//!     .headers
//!     .insert("content-type".into(), "application/json".into());
//! request.body = Some(serde_json::json!({"name": "odie", "photoUrls": []}));
//!
//! if let Some(operation) = api.get_operation_for_request(&request) {
//!     let results = operation.validate_request(&request);
//!     assert!(results.is_valid());
//! }
//! # Ok(())
//! # }
//! ```

pub mod content_type;
pub mod convert;
pub mod errors;
pub mod matcher;
pub mod model;
pub mod request;
pub mod sample;
pub mod schema;
pub mod spec;

pub use errors::{codes, ValidationError, ValidationResults};
pub use matcher::PathTemplate;
pub use model::{
    Api, ApiOptions, Operation, Parameter, ParameterValue, PathItem, Response, ResponseHeader,
    ValueError,
};
pub use request::Request;
pub use sample::{Sampler, SchemaSampler};
pub use schema::{CompiledSchema, SchemaValidator};
pub use spec::types::{CollectionFormat, ParameterLocation, SecurityRequirement};
