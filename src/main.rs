use std::sync::Arc;

use mcp_tool_dispatch::{
    build_app, config::Config, logging, logging::RequestLog, tool_provider::HttpToolProvider,
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let provider = Arc::new(HttpToolProvider::new(&config)?);
    let request_log = config.request_log_path.clone().map(RequestLog::new);

    let bind_socket = config.bind_socket()?;
    let app = build_app(AppState::new(provider, request_log));
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        weather_configured = config.weather_api_key.is_some(),
        request_log = config.request_log_path.is_some(),
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
