//! # Spec Module
//!
//! Raw-document plumbing for resolved Swagger 2.0 trees: parameter and
//! media-type vocabulary, JSON Pointer helpers, base-path normalization,
//! and the loading helpers that turn YAML/JSON text into the `Value` tree
//! the model is built from.
//!
//! The model itself lives in [`crate::model`]; this module stays at the
//! level of the document.

pub mod build;
pub mod load;
pub mod types;

pub use build::{normalize_base_path, parse_method, METHODS};
pub use load::{load_document, parse_document};
pub use types::{
    escape_pointer_token, json_type_name, CollectionFormat, ParameterLocation,
    SecurityRequirement,
};
