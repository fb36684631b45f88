//! Incoming request carrier.
//!
//! A transport-neutral snapshot of an HTTP request: the model never talks
//! to a socket, it only inspects this struct. Adapters for concrete HTTP
//! runtimes populate the fields they have; everything is optional except
//! the URL and method.

use serde_json::Value;
use std::collections::HashMap;

/// An HTTP-shaped request to dispatch and validate.
///
/// `query` values are either a string or an array of strings (for
/// `collectionFormat: multi` parameters the transport delivers repeated
/// keys as a list). Header lookup is case-insensitive with a
/// lowercase-keyed lookup attempted first.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Request URL; the query string and fragment are ignored for matching.
    pub url: String,
    /// HTTP method in any casing.
    pub method: String,
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, Value>,
    /// Decoded request body. For form bodies this is an object keyed by
    /// field name.
    pub body: Option<Value>,
    /// Uploaded files keyed by form field name.
    pub files: HashMap<String, Value>,
}

impl Request {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Request {
            url: url.into(),
            method: method.into(),
            ..Request::default()
        }
    }

    /// Case-insensitive header lookup, lowercase key first.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        let lower = name.to_ascii_lowercase();
        if let Some(value) = self.headers.get(&lower) {
            return Some(value.as_str());
        }
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header_value("content-type")
    }

    /// The path portion of the URL, query string and fragment stripped.
    pub fn path(&self) -> String {
        let parsed = url::Url::parse(&self.url)
            .or_else(|_| url::Url::parse(&format!("http://placeholder{}", self.url)));
        match parsed {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => self
                .url
                .split(['?', '#'])
                .next()
                .unwrap_or("")
                .to_string(),
        }
    }
}
