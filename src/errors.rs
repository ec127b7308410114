use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    BadInput,
    NotFound,
    UpstreamFailure,
    ConfigMissing,
}

/// Failure reported by a tool provider. The message is shown to the caller verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self {
            kind: ToolErrorKind::BadInput,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ToolErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: ToolErrorKind::UpstreamFailure,
            message: message.into(),
        }
    }

    pub fn config_missing(message: impl Into<String>) -> Self {
        Self {
            kind: ToolErrorKind::ConfigMissing,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ToolErrorKind::BadInput => StatusCode::BAD_REQUEST,
            ToolErrorKind::NotFound => StatusCode::NOT_FOUND,
            ToolErrorKind::UpstreamFailure | ToolErrorKind::ConfigMissing => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    MalformedRequest(&'static str),
    #[error("Unknown function. Available functions: {available}")]
    UnknownFunction { available: String },
    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),
    #[error("Unexpected parameters: {}", .0.join(", "))]
    UnexpectedParameters(Vec<String>),
    #[error("Parameter {0} must be a string")]
    InvalidParameterType(&'static str),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl DispatchError {
    pub const INVALID_JSON: &'static str = "Invalid JSON format in request";
    pub const NOT_AN_OBJECT: &'static str = "Request must be a JSON object";
    pub const INVALID_QUERY: &'static str = "Invalid query string";

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Tool(err) => err.status(),
            Self::MalformedRequest(_)
            | Self::UnknownFunction { .. }
            | Self::MissingParameter(_)
            | Self::UnexpectedParameters(_)
            | Self::InvalidParameterType(_) => StatusCode::BAD_REQUEST,
        }
    }
}
