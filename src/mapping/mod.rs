//! Lookup from (path, method) to the handler that serves it.

mod annotation;
mod key;

pub use annotation::AnnotationHandlerMapping;
pub use key::HandlerKey;

use crate::error::Result;
use crate::handler::HandlerExecution;
use crate::http::{Request, RequestMethod};

/// Resolves inbound requests to handlers.
///
/// Implementations are populated once at startup and only read afterwards,
/// so lookups take `&self` and may run concurrently.
pub trait HandlerMapping: Send + Sync {
    /// True iff a handler is mapped for exactly this path and method.
    fn support(&self, path: &str, method: RequestMethod) -> bool;

    /// Handler for the request's path and method, or `RouteNotFound`.
    fn get_handler(&self, request: &Request) -> Result<&HandlerExecution>;
}
