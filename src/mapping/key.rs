use crate::http::RequestMethod;
use std::fmt;

/// Exact lookup key: a request path and a method.
///
/// Paths compare byte for byte; no patterns or wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerKey {
    url: String,
    method: RequestMethod,
}

impl HandlerKey {
    pub fn new(url: impl Into<String>, method: RequestMethod) -> Self {
        Self {
            url: url.into(),
            method,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
