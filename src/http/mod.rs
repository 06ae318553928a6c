//! HTTP request methods understood by the handler mapping.

use axum::http::Method;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub use axum::body::Body;

/// Inbound request type handed to controller methods.
pub type Request = axum::http::Request<Body>;

/// Response sink controller methods may write to directly.
pub type Response = axum::http::Response<Body>;

/// HTTP verbs a route can be declared for.
///
/// Tokens are the upper-case method names, e.g. `"GET"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl RequestMethod {
    /// Maps a transport method onto a routable verb. Extension methods yield `None`.
    pub fn of(method: &Method) -> Option<Self> {
        method.as_str().parse().ok()
    }

    pub fn as_method(&self) -> Method {
        match self {
            RequestMethod::Get => Method::GET,
            RequestMethod::Head => Method::HEAD,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Patch => Method::PATCH,
            RequestMethod::Delete => Method::DELETE,
            RequestMethod::Options => Method::OPTIONS,
            RequestMethod::Trace => Method::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tokens_are_upper_case() {
        assert_eq!(RequestMethod::Get.to_string(), "GET");
        assert_eq!(RequestMethod::Options.as_ref(), "OPTIONS");
        assert_eq!("DELETE".parse::<RequestMethod>().unwrap(), RequestMethod::Delete);
        assert!("get".parse::<RequestMethod>().is_err());
    }

    #[test]
    fn test_of_round_trips_every_standard_method() {
        for method in RequestMethod::iter() {
            assert_eq!(RequestMethod::of(&method.as_method()), Some(method));
        }
    }

    #[test]
    fn test_extension_method_is_not_routable() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        assert_eq!(RequestMethod::of(&purge), None);
        assert_eq!(RequestMethod::of(&Method::CONNECT), None);
    }
}
