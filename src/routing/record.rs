//! Redirect record definition.

use serde::Deserialize;

/// One routing rule: requests for `path` are redirected to `url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedirectRecord {
    pub path: String,
    pub url: String,
}

impl RedirectRecord {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}
