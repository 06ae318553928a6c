use proc_macro::TokenStream;

mod controller;
mod http_methods;
mod routes;

/// Attribute macro marking a struct as a controller
///
/// Implements `handlermap::Controller`. Instances are built with `Default`
/// unless `constructor` names an associated function returning
/// `Result<Self, E>`.
///
/// # Example
/// ```ignore
/// use handlermap::controller;
///
/// #[controller(path = "/users")]
/// #[derive(Default)]
/// pub struct UserController;
///
/// #[controller(constructor = "connect")]
/// pub struct ReportController {
///     dsn: String,
/// }
///
/// impl ReportController {
///     fn connect() -> Result<Self, std::env::VarError> {
///         Ok(Self { dsn: std::env::var("REPORT_DSN")? })
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::controller_attribute(attr, item)
}

/// Attribute macro registering the handler methods of a controller impl block
///
/// # Example
/// ```ignore
/// use handlermap::prelude::*;
///
/// #[controller(path = "/users")]
/// #[derive(Default)]
/// pub struct UserController;
///
/// #[routes]
/// impl UserController {
///     #[request_mapping("/list", method = [GET, HEAD])]
///     fn list(&self, _req: &Request, _res: &mut Response) -> ModelAndView {
///         ModelAndView::new("user/list")
///     }
///
///     #[post("/create")]
///     fn create(&self, _req: &Request, _res: &mut Response) -> ModelAndView {
///         ModelAndView::redirect("/users/list")
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn routes(attr: TokenStream, item: TokenStream) -> TokenStream {
    routes::routes_attribute(attr, item)
}

/// Maps a controller method to a path and a set of request methods
///
/// Only meaningful inside a `#[routes]` impl block. Without a `method`
/// list the handler is never mapped.
#[proc_macro_attribute]
pub fn request_mapping(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}

/// HTTP GET method attribute for controller methods
#[proc_macro_attribute]
pub fn get(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}

/// HTTP HEAD method attribute for controller methods
#[proc_macro_attribute]
pub fn head(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}

/// HTTP POST method attribute for controller methods
#[proc_macro_attribute]
pub fn post(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}

/// HTTP PUT method attribute for controller methods
#[proc_macro_attribute]
pub fn put(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}

/// HTTP PATCH method attribute for controller methods
#[proc_macro_attribute]
pub fn patch(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}

/// HTTP DELETE method attribute for controller methods
#[proc_macro_attribute]
pub fn delete(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}

/// HTTP OPTIONS method attribute for controller methods
#[proc_macro_attribute]
pub fn options(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}

/// HTTP TRACE method attribute for controller methods
#[proc_macro_attribute]
pub fn trace(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute(attr, item)
}
