//! Sanitized access to request inputs.
//!
//! Every page treats its inputs as optional strings with safe defaults, so
//! there is no schema validation layer; values are trimmed, stripped of
//! control characters, and HTML-escaped before any use.

use std::collections::HashMap;

use crate::views::escape_html;

/// Decoded urlencoded key-value pairs from a query string or form body.
pub type ParamMap = HashMap<String, String>;

/// The parsed inputs of one request. Form values take precedence over query
/// values when both carry the same key.
#[derive(Debug, Default)]
pub struct RequestInput {
    query: ParamMap,
    form: ParamMap,
}

impl RequestInput {
    pub fn new(query: ParamMap, form: ParamMap) -> Self {
        Self { query, form }
    }

    /// Fetch a sanitized input value, or the caller-supplied default when
    /// the key is absent. The default is returned as-is.
    pub fn param(&self, key: &str, default: &str) -> String {
        match self.form.get(key).or_else(|| self.query.get(key)) {
            Some(raw) => sanitize(raw),
            None => default.to_string(),
        }
    }
}

/// Trim, drop control characters, and HTML-escape an input value.
pub fn sanitize(raw: &str) -> String {
    let cleaned: String = raw.trim().chars().filter(|c| !c.is_control()).collect();
    escape_html(&cleaned)
}
