use thiserror::Error;

/// Boxed error type returned by controller constructors and handler bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, HandlerMapError>;

#[derive(Debug, Error)]
pub enum HandlerMapError {
    #[error("No handler mapped for [{method} {path}]")]
    RouteNotFound { method: String, path: String },

    #[error("Failed to instantiate controller {controller}: {source}")]
    Instantiation {
        controller: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Handler {controller}::{method} failed: {source}")]
    Invocation {
        controller: &'static str,
        method: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Duplicate handler mapping for [{method} {path}]")]
    DuplicateMapping { method: String, path: String },

    #[error("Failed to serialize model attribute: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl HandlerMapError {
    pub fn route_not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::RouteNotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Status code the hosting layer should answer with.
    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            HandlerMapError::RouteNotFound { .. } => axum::http::StatusCode::NOT_FOUND,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for HandlerMapError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let message = match &self {
            HandlerMapError::RouteNotFound { .. } => self.to_string(),
            _ => "Internal Server Error".to_string(),
        };
        (
            status,
            axum::Json(serde_json::json!({
                "statusCode": status.as_u16(),
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_route_not_found_carries_method_and_path() {
        let err = HandlerMapError::route_not_found("GET", "/missing");
        assert_eq!(err.to_string(), "No handler mapped for [GET /missing]");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invocation_failure_maps_to_500() {
        let err = HandlerMapError::Invocation {
            controller: "Ping",
            method: "pong",
            source: "boom".into(),
        };
        assert!(err.to_string().contains("Ping::pong"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
