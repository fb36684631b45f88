//! Path template compiler.
//!
//! Compiles a Swagger path template such as `/pet/{petId}/uploadImage`
//! (prefixed with the API base path) into an anchored regex where every
//! `{name}` segment captures one non-empty, slash-free path segment.
//! Capture names keep their declaration order so positional captures can
//! be mapped back to declared path parameters.

use anyhow::bail;
use regex::Regex;

/// A compiled path template: anchored regex plus ordered capture names.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    template: String,
    regex: Regex,
    params: Vec<String>,
}

impl PathTemplate {
    /// Compile `base_path + template` into a matcher.
    ///
    /// Literal segments are regex-escaped; `{name}` segments become
    /// `([^/]+)` captures. With `tolerate_trailing_slash` the matcher also
    /// accepts one trailing `/`. Duplicate `{name}` tokens in a single
    /// template are rejected: captures are mapped to parameters by name,
    /// which requires names to be unique.
    pub fn compile(
        base_path: &str,
        template: &str,
        tolerate_trailing_slash: bool,
    ) -> anyhow::Result<Self> {
        let full = format!("{base_path}{template}");
        let mut pattern = String::with_capacity(full.len() + 8);
        pattern.push('^');
        let mut params = Vec::with_capacity(full.matches('{').count());

        if full == "/" {
            pattern.push('/');
        } else {
            for segment in full.split('/') {
                if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 2 {
                    let name = &segment[1..segment.len() - 1];
                    if params.iter().any(|p| p == name) {
                        bail!("duplicate path parameter '{{{name}}}' in template '{template}'");
                    }
                    pattern.push_str("/([^/]+)");
                    params.push(name.to_string());
                } else if !segment.is_empty() {
                    pattern.push('/');
                    pattern.push_str(&regex::escape(segment));
                }
            }
        }

        if tolerate_trailing_slash {
            pattern.push_str("/?");
        }
        pattern.push('$');

        let regex = Regex::new(&pattern)?;
        Ok(PathTemplate {
            template: full,
            regex,
            params,
        })
    }

    /// The full template this matcher was compiled from (base path included).
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Ordered `{name}` capture names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Position of a named capture among the template's parameters.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p == name)
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Run the matcher, returning captured segments in declaration order.
    pub fn exec(&self, path: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(path)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|c| c.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_template() {
        let t = PathTemplate::compile("", "/pet", false).unwrap();
        assert!(t.is_match("/pet"));
        assert!(!t.is_match("/pets"));
        assert!(!t.is_match("/pet/"));
        assert!(!t.is_match("/pet/1"));
    }

    #[test]
    fn test_base_path_prefix() {
        let t = PathTemplate::compile("/v2", "/pet/{petId}", false).unwrap();
        assert!(t.is_match("/v2/pet/1"));
        assert!(!t.is_match("/pet/1"));
        assert_eq!(t.exec("/v2/pet/1"), Some(vec!["1".to_string()]));
    }

    #[test]
    fn test_captures_preserve_declaration_order() {
        let t = PathTemplate::compile("", "/store/{orderId}/items/{itemId}", false).unwrap();
        assert_eq!(t.params(), &["orderId", "itemId"]);
        assert_eq!(
            t.exec("/store/7/items/abc"),
            Some(vec!["7".to_string(), "abc".to_string()])
        );
        assert_eq!(t.param_index("itemId"), Some(1));
    }

    #[test]
    fn test_segment_must_not_contain_slash() {
        let t = PathTemplate::compile("", "/pet/{petId}", false).unwrap();
        assert!(!t.is_match("/pet/1/extra"));
        assert!(!t.is_match("/pet/"));
        assert!(t.is_match("/pet/not%20a%20number"));
    }

    #[test]
    fn test_trailing_slash_tolerance() {
        let strict = PathTemplate::compile("", "/pet", false).unwrap();
        let tolerant = PathTemplate::compile("", "/pet", true).unwrap();
        assert!(!strict.is_match("/pet/"));
        assert!(tolerant.is_match("/pet/"));
        assert!(tolerant.is_match("/pet"));
    }

    #[test]
    fn test_literal_segments_are_escaped() {
        let t = PathTemplate::compile("", "/pet.json", false).unwrap();
        assert!(t.is_match("/pet.json"));
        assert!(!t.is_match("/petXjson"));
    }

    #[test]
    fn test_root_template() {
        let t = PathTemplate::compile("", "/", false).unwrap();
        assert!(t.is_match("/"));
        assert!(!t.is_match("/x"));
    }

    #[test]
    fn test_duplicate_param_names_rejected() {
        assert!(PathTemplate::compile("", "/a/{id}/b/{id}", false).is_err());
    }
}
