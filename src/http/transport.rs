//! Response framing
//!
//! The transport mode is decided once from the `Accept` header and then used to frame
//! exactly one message: a plain JSON body, or a single server-sent `data:` event.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::stream;
use tracing::error;

use crate::domain::reply::Reply;

pub const EVENT_STREAM: &str = "text/event-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Buffered,
    Streaming,
}

impl TransportMode {
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(value) if value.contains(EVENT_STREAM) => Self::Streaming,
            _ => Self::Buffered,
        }
    }
}

impl<S> FromRequestParts<S> for TransportMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok());
        Ok(Self::from_accept(accept))
    }
}

/// Writes a reply in the framing selected for this request.
pub fn emit(reply: Reply, mode: TransportMode) -> Response {
    let Reply { status, envelope } = reply;

    match mode {
        TransportMode::Buffered => (status, Json(envelope)).into_response(),
        TransportMode::Streaming => match Event::default().json_data(&envelope) {
            Ok(event) => {
                let frames = stream::once(async move { Ok::<_, Infallible>(event) });
                (status, Sse::new(frames)).into_response()
            }
            Err(err) => {
                error!(error = %err, "failed to encode event-stream frame");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
    }
}
