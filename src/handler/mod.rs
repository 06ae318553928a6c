//! Handler descriptors and the controller contract.
//!
//! Controllers are usually declared with the `#[controller]` and `#[routes]`
//! macros, which implement [`Controller`] and submit a
//! [`ControllerRegistration`] for every annotated impl block.

mod execution;
mod registry;

pub use execution::{HandlerExecution, HandlerFn, IntoModelAndView, invoke};
pub use registry::{ControllerRegistration, HandlerMethod, registrations};

use crate::error::BoxError;

/// A type holding request handling methods.
///
/// A fresh instance is created for every invocation, so controllers must not
/// rely on state surviving between requests.
pub trait Controller: Sized + 'static {
    /// Zero-argument factory used once per invocation.
    fn instantiate() -> std::result::Result<Self, BoxError>;
}

/// Joins a controller base path with a method path.
///
/// An empty or `/` base leaves the method path untouched.
pub fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    if path.is_empty() || path == "/" {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "/ping"), "/ping");
        assert_eq!(join_path("/", "/ping"), "/ping");
        assert_eq!(join_path("/users", "/list"), "/users/list");
        assert_eq!(join_path("/users/", "list"), "/users/list");
        assert_eq!(join_path("/users", ""), "/users");
        assert_eq!(join_path("/users", "/"), "/users");
    }
}
