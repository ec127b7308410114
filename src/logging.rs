use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use axum::{extract::Request, middleware::Next, response::Response};
use chrono::Local;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = elapsed_ms,
        "request summary"
    );

    if status.is_client_error() || status.is_server_error() {
        warn!(method = %method, path = %path, status = status.as_u16(), "request failed");
    }

    response
}

/// Append-only log of raw dispatch inputs, one timestamped line per request.
///
/// Recording is best effort: write failures are logged and dropped.
#[derive(Debug)]
pub struct RequestLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RequestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn record(&self, raw_input: &str) {
        let line = format!(
            "[{}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            raw_input.replace(['\r', '\n'], " ")
        );

        let _guard = self.write_lock.lock().await;
        if let Err(err) = self.append(line.as_bytes()).await {
            debug!(path = %self.path.display(), error = %err, "request log write failed");
        }
    }

    async fn append(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await
    }
}
