//! Axum HTTP handlers for the web server
//!
//! Provides the single dispatch endpoint, its pre-flight answer, and a liveness probe.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::Response,
    Json,
};
use serde::Serialize;

use crate::domain::functions::dispatch_direct;
use crate::domain::reply::Reply;
use crate::domain::request::{parse_request, Inbound};
use crate::http::transport::{emit, TransportMode};
use crate::mcp::server::handle_rpc_call;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Bare OPTIONS requests. Browser pre-flights are answered by the CORS layer before
/// reaching this handler.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn dispatch_endpoint(
    State(state): State<AppState>,
    mode: TransportMode,
    uri: Uri,
    query: Result<Query<BTreeMap<String, String>>, axum::extract::rejection::QueryRejection>,
    body: Bytes,
) -> Response {
    if let Some(request_log) = &state.request_log {
        let raw_input = if body.is_empty() {
            uri.query().unwrap_or_default().to_string()
        } else {
            String::from_utf8_lossy(&body).into_owned()
        };
        request_log.record(&raw_input).await;
    }

    let query = query.ok().map(|Query(pairs)| pairs);
    let reply = match parse_request(&body, query) {
        Ok(Inbound::Rpc(fields)) => handle_rpc_call(&fields),
        Ok(Inbound::Direct(fields)) => dispatch_direct(state.tool_provider.as_ref(), &fields).await,
        Err(err) => Reply::from(err),
    };

    emit(reply, mode)
}
