use super::Controller;
use crate::error::{BoxError, HandlerMapError, Result};
use crate::http::{Request, Response};
use crate::view::ModelAndView;
use std::fmt;

/// Instantiate-then-invoke entry point stored for each route.
pub type HandlerFn = fn(&Request, &mut Response) -> Result<ModelAndView>;

/// Return types a handler method may declare.
///
/// Anything else fails to compile, so there is no runtime result cast.
pub trait IntoModelAndView {
    fn into_model_and_view(self) -> std::result::Result<ModelAndView, BoxError>;
}

impl IntoModelAndView for ModelAndView {
    fn into_model_and_view(self) -> std::result::Result<ModelAndView, BoxError> {
        Ok(self)
    }
}

impl<E> IntoModelAndView for std::result::Result<ModelAndView, E>
where
    E: Into<BoxError>,
{
    fn into_model_and_view(self) -> std::result::Result<ModelAndView, BoxError> {
        self.map_err(Into::into)
    }
}

/// Creates a fresh `C` and runs `method` on it.
///
/// Construction failures surface as [`HandlerMapError::Instantiation`] and
/// handler failures as [`HandlerMapError::Invocation`], each with the
/// original error as its source.
pub fn invoke<C, R>(
    controller: &'static str,
    method: &'static str,
    request: &Request,
    response: &mut Response,
    handler: impl FnOnce(&C, &Request, &mut Response) -> R,
) -> Result<ModelAndView>
where
    C: Controller,
    R: IntoModelAndView,
{
    let instance =
        C::instantiate().map_err(|source| HandlerMapError::Instantiation { controller, source })?;
    handler(&instance, request, response)
        .into_model_and_view()
        .map_err(|source| HandlerMapError::Invocation {
            controller,
            method,
            source,
        })
}

/// Resolved (controller, method) pair ready for invocation.
#[derive(Clone, Copy)]
pub struct HandlerExecution {
    controller: &'static str,
    method: &'static str,
    handle: HandlerFn,
}

impl HandlerExecution {
    pub const fn new(controller: &'static str, method: &'static str, handle: HandlerFn) -> Self {
        Self {
            controller,
            method,
            handle,
        }
    }

    pub fn controller(&self) -> &'static str {
        self.controller
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn handle(&self, request: &Request, response: &mut Response) -> Result<ModelAndView> {
        (self.handle)(request, response)
    }
}

impl PartialEq for HandlerExecution {
    fn eq(&self, other: &Self) -> bool {
        self.controller == other.controller && self.method == other.method
    }
}

impl Eq for HandlerExecution {}

impl fmt::Debug for HandlerExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerExecution")
            .field("controller", &self.controller)
            .field("method", &self.method)
            .finish()
    }
}

impl fmt::Display for HandlerExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.method)
    }
}
