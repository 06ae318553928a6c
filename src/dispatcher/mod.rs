//! Request dispatch on top of a [`HandlerMapping`].
//!
//! The dispatcher is the thin hosting layer around the mapping: it resolves
//! a handler, invokes it and turns the outcome into an HTTP response.

use crate::error::Result;
use crate::http::{Body, Request, Response};
use crate::mapping::HandlerMapping;
use crate::view::ModelAndView;
use axum::body::HttpBody;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

pub struct Dispatcher<M> {
    mapping: Arc<M>,
}

impl<M> Clone for Dispatcher<M> {
    fn clone(&self) -> Self {
        Self {
            mapping: Arc::clone(&self.mapping),
        }
    }
}

impl<M: HandlerMapping + 'static> Dispatcher<M> {
    /// Takes an already initialized mapping; it is never mutated afterwards.
    pub fn new(mapping: Arc<M>) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &M {
        &self.mapping
    }

    /// Resolves the handler for `request` and invokes it.
    pub fn service(&self, request: &Request, response: &mut Response) -> Result<ModelAndView> {
        let span = tracing::debug_span!(
            "dispatch",
            method = %request.method(),
            path = request.uri().path()
        );
        let _enter = span.enter();

        let handler = self.mapping.get_handler(request)?;
        tracing::debug!(handler = %handler, "Dispatching request");
        handler.handle(request, response)
    }

    /// Dispatches `request` and renders the outcome.
    ///
    /// Failures become error responses: 404 when no handler is mapped,
    /// 500 otherwise.
    pub fn handle(&self, request: Request) -> Response {
        let mut response = Response::new(Body::empty());
        match self.service(&request, &mut response) {
            Ok(model_and_view) => render(model_and_view, response),
            Err(err) => {
                if err.status_code().is_server_error() {
                    tracing::error!(
                        method = %request.method(),
                        path = request.uri().path(),
                        error = %err,
                        "Handler failed"
                    );
                } else {
                    tracing::debug!(error = %err, "No handler");
                }
                err.into_response()
            }
        }
    }

    /// Axum router sending every request through this dispatcher.
    pub fn router(self) -> axum::Router {
        axum::Router::new().fallback(move |request: Request| {
            let dispatcher = self.clone();
            async move { dispatcher.handle(request) }
        })
    }
}

/// Redirect views become `302 Found`. Otherwise the model is written as JSON,
/// unless the handler already set a non-200 status, its own content type or
/// a body.
fn render(model_and_view: ModelAndView, mut response: Response) -> Response {
    if let Some(location) = model_and_view.redirect_target() {
        return match HeaderValue::from_str(location) {
            Ok(location) => {
                *response.status_mut() = StatusCode::FOUND;
                response.headers_mut().insert(header::LOCATION, location);
                response
            }
            Err(_) => {
                tracing::error!(location, "Invalid redirect location");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        };
    }

    if response.status() != StatusCode::OK
        || response.headers().contains_key(header::CONTENT_TYPE)
        || response.body().size_hint().exact() != Some(0)
    {
        return response;
    }

    match serde_json::to_vec(model_and_view.model()) {
        Ok(body) => {
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            *response.body_mut() = Body::from(body);
            response
        }
        Err(err) => {
            tracing::error!(error = %err, view = model_and_view.view_name(), "Failed to render model");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
