//! Content-Type negotiation.
//!
//! Matches an actual media type against a declared `consumes`/`produces`
//! list. Matching compares the `type/subtype` portion with parameters such
//! as `; charset=utf-8` stripped, but an exact full-string match (including
//! parameters) also counts. There is no wildcard matching.

use crate::errors::{codes, ValidationError};

/// Media type assumed when a request or response carries no Content-Type.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// The `type/subtype` portion of a media type, lowercased and trimmed.
fn media_range(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Check an actual media type against the declared set.
///
/// An absent actual Content-Type is treated as
/// [`DEFAULT_CONTENT_TYPE`]. An empty declared set accepts anything; the
/// callers skip negotiation entirely in that case, this is just the
/// matching policy.
pub fn negotiate(actual: Option<&str>, supported: &[String]) -> Result<(), ValidationError> {
    if supported.is_empty() {
        return Ok(());
    }
    let actual = actual.unwrap_or(DEFAULT_CONTENT_TYPE);
    let range = media_range(actual);
    let matched = supported
        .iter()
        .any(|declared| declared == actual || media_range(declared) == range);
    if matched {
        Ok(())
    } else {
        Err(ValidationError::new(
            codes::INVALID_CONTENT_TYPE,
            format!(
                "Invalid Content-Type ({actual}). These are supported: {}",
                supported.join(", ")
            ),
            Vec::new(),
        ))
    }
}
