//! End-to-end dispatch through the axum router.

use axum::http::{StatusCode, header};
use handlermap::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt; // for `oneshot`

mod web {
    use handlermap::prelude::*;

    #[derive(Debug)]
    pub struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("boom")
        }
    }

    impl std::error::Error for Boom {}

    #[controller(path = "/users")]
    #[derive(Default)]
    pub struct UserController;

    #[routes]
    impl UserController {
        #[get("/detail")]
        fn detail(&self, req: &Request, _res: &mut Response) -> Result<ModelAndView, HandlerMapError> {
            ModelAndView::new("user/detail")
                .with_object("account", "gugu")?
                .with_object("query", req.uri().query())
        }

        #[post("/create")]
        fn create(&self, _req: &Request, res: &mut Response) -> ModelAndView {
            *res.status_mut() = axum::http::StatusCode::CREATED;
            ModelAndView::new("user/created")
        }

        #[post("/logout")]
        fn logout(&self, _req: &Request, _res: &mut Response) -> ModelAndView {
            ModelAndView::redirect("/index.html")
        }

        #[get("/raw")]
        fn raw(&self, _req: &Request, res: &mut Response) -> ModelAndView {
            *res.body_mut() = Body::from("hello");
            ModelAndView::new("raw")
        }

        #[get("/explode")]
        fn explode(&self, _req: &Request, _res: &mut Response) -> Result<ModelAndView, Boom> {
            Err(Boom)
        }
    }
}

fn app() -> axum::Router {
    let mut mapping = AnnotationHandlerMapping::new(MappingConfig::default());
    mapping.initialize(&["dispatcher::web"]).unwrap();
    Dispatcher::new(Arc::new(mapping)).router()
}

fn request(method: &str, uri: &str) -> Request {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

#[tokio::test]
async fn test_model_rendered_as_json() {
    let response = app()
        .oneshot(request("GET", "/users/detail?tab=posts"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        body_json(response).await,
        json!({ "account": "gugu", "query": "tab=posts" })
    );
}

#[tokio::test]
async fn test_unmapped_request_is_404() {
    let response = app().oneshot(request("GET", "/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "No handler mapped for [GET /users]");
}

#[tokio::test]
async fn test_wrong_method_is_404() {
    let response = app()
        .oneshot(request("DELETE", "/users/detail"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_handler_status_is_kept() {
    let response = app()
        .oneshot(request("POST", "/users/create"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_handler_written_body_is_kept() {
    let response = app().oneshot(request("GET", "/users/raw")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key(header::CONTENT_TYPE));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    assert_eq!(&bytes[..], b"hello");
}

#[tokio::test]
async fn test_redirect_view() {
    let response = app()
        .oneshot(request("POST", "/users/logout"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/index.html");
}

#[tokio::test]
async fn test_handler_failure_is_500() {
    let response = app()
        .oneshot(request("GET", "/users/explode"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["message"], "Internal Server Error");
}

#[test]
fn test_service_returns_model_and_view() {
    let mut mapping = AnnotationHandlerMapping::new(MappingConfig::default());
    mapping.initialize(&["dispatcher::web"]).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(mapping));

    let req = request("GET", "/users/detail");
    let mut res = Response::new(Body::empty());
    let mav = dispatcher.service(&req, &mut res).unwrap();
    assert_eq!(mav.view_name(), "user/detail");
    assert_eq!(mav.get_object("query"), Some(&Value::Null));

    let err = dispatcher
        .service(&request("GET", "/nope"), &mut res)
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}
