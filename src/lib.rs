//! # Handlermap
//!
//! Annotation-driven handler mapping for controller-based web applications.
//!
//! Controllers declare their routes with attribute macros. At startup an
//! [`AnnotationHandlerMapping`] scans the controllers linked into the binary
//! under a set of module paths and builds an exact (path, method) lookup
//! table. Each request is resolved against that table and the matching
//! handler runs on a freshly created controller, producing a
//! [`ModelAndView`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use handlermap::prelude::*;
//!
//! #[controller]
//! #[derive(Default)]
//! pub struct PingController;
//!
//! #[routes]
//! impl PingController {
//!     #[request_mapping("/ping", method = [GET])]
//!     fn pong(&self, _req: &Request, _res: &mut Response) -> ModelAndView {
//!         ModelAndView::new("pong")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut mapping = AnnotationHandlerMapping::new(MappingConfig::default());
//!     mapping.initialize(&[module_path!()])?;
//!
//!     let app = Dispatcher::new(Arc::new(mapping)).router();
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod http;
pub mod mapping;
pub mod view;

// Re-export core types
pub use config::{ConfigService, ConflictPolicy, MappingConfig};
pub use dispatcher::Dispatcher;
pub use error::{BoxError, HandlerMapError, Result};
pub use handler::{Controller, ControllerRegistration, HandlerExecution, HandlerMethod};
pub use http::{Request, RequestMethod, Response};
pub use mapping::{AnnotationHandlerMapping, HandlerKey, HandlerMapping};
pub use view::ModelAndView;

// Re-export macros
pub use handlermap_macro::{
    controller, delete, get, head, options, patch, post, put, request_mapping, routes, trace,
};

// Used by macro expansions
#[doc(hidden)]
pub use inventory;

/// Prelude module for convenient imports
///
/// ```
/// use handlermap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigService, ConflictPolicy, MappingConfig};
    pub use crate::dispatcher::Dispatcher;
    pub use crate::error::{BoxError, HandlerMapError};
    pub use crate::handler::{Controller, HandlerExecution};
    pub use crate::http::{Body, Request, RequestMethod, Response};
    pub use crate::mapping::{AnnotationHandlerMapping, HandlerKey, HandlerMapping};
    pub use crate::view::ModelAndView;
    pub use crate::{
        controller, delete, get, head, options, patch, post, put, request_mapping, routes, trace,
    };
    pub use std::sync::Arc;
}
