//! Response envelopes produced by the dispatcher
//!
//! A reply always carries exactly one of `result` or `error` together with the
//! transport status code it should be sent with.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::errors::DispatchError;
use crate::mcp::rpc::RpcEnvelope;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectEnvelope {
    Result(Value),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Direct(DirectEnvelope),
    Rpc(RpcEnvelope),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl Reply {
    pub fn success(result: Value) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope::Direct(DirectEnvelope::Result(result)),
        }
    }

    pub fn rpc(status: StatusCode, envelope: RpcEnvelope) -> Self {
        Self {
            status,
            envelope: Envelope::Rpc(envelope),
        }
    }
}

impl From<DispatchError> for Reply {
    fn from(err: DispatchError) -> Self {
        Self {
            status: err.status(),
            envelope: Envelope::Direct(DirectEnvelope::Error(err.to_string())),
        }
    }
}
