use std::sync::Arc;

use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod tool_provider;

use logging::RequestLog;
use tool_provider::ToolProvider;

#[derive(Clone)]
pub struct AppState {
    pub tool_provider: Arc<dyn ToolProvider>,
    pub request_log: Option<Arc<RequestLog>>,
}

impl AppState {
    pub fn new(tool_provider: Arc<dyn ToolProvider>, request_log: Option<RequestLog>) -> Self {
        Self {
            tool_provider,
            request_log: request_log.map(Arc::new),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route(
            "/",
            get(http::handlers::dispatch_endpoint)
                .post(http::handlers::dispatch_endpoint)
                .options(http::handlers::preflight),
        )
        .route("/health", get(http::handlers::health))
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
