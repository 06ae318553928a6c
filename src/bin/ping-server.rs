use handlermap::prelude::*;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

mod web {
    use handlermap::prelude::*;
    use serde_json::json;

    #[controller]
    #[derive(Default)]
    pub struct PingController;

    #[routes]
    impl PingController {
        #[request_mapping("/ping", method = [GET, HEAD])]
        fn pong(&self, _req: &Request, _res: &mut Response) -> ModelAndView {
            ModelAndView::new("pong")
        }
    }

    #[controller(path = "/echo")]
    #[derive(Default)]
    pub struct EchoController;

    #[routes]
    impl EchoController {
        #[post]
        fn echo(
            &self,
            req: &Request,
            _res: &mut Response,
        ) -> Result<ModelAndView, HandlerMapError> {
            ModelAndView::new("echo")
                .with_object("path", req.uri().path())?
                .with_object("query", json!(req.uri().query()))
        }

        #[get("/home")]
        fn home(&self, _req: &Request, _res: &mut Response) -> ModelAndView {
            ModelAndView::redirect("/ping")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("🚀 Starting ping server...");

    let config = ConfigService::from_env();
    let mut mapping_config = MappingConfig::from_config(&config)?;
    if mapping_config.scan_roots.is_empty() {
        mapping_config.scan_roots.push(format!("{}::web", module_path!()));
    }

    // Built once here; every request only reads it.
    let mapping = Arc::new(AnnotationHandlerMapping::from_config(mapping_config)?);
    for key in mapping.keys() {
        tracing::info!(route = %key, "Route registered");
    }

    let app = Dispatcher::new(mapping)
        .router()
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .get("PING_SERVER_ADDR")
        .unwrap_or_else(|| "127.0.0.1:3000".to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("📡 Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
