//! JSON-RPC response envelopes
//!
//! The caller's `id` is echoed back untouched, including `null` and string ids.

use serde::Serialize;
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

pub const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcEnvelope {
    pub jsonrpc: &'static str,
    #[serde(flatten)]
    pub outcome: RpcOutcome,
    pub id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcOutcome {
    Result(Value),
    Error(RpcError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

pub fn json_rpc_result(id: Value, result: Value) -> RpcEnvelope {
    RpcEnvelope {
        jsonrpc: JSONRPC_VERSION,
        outcome: RpcOutcome::Result(result),
        id,
    }
}

pub fn json_rpc_error(id: Value, code: i64, message: &str) -> RpcEnvelope {
    RpcEnvelope {
        jsonrpc: JSONRPC_VERSION,
        outcome: RpcOutcome::Error(RpcError {
            code,
            message: message.to_string(),
        }),
        id,
    }
}

impl RpcEnvelope {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, RpcOutcome::Error(_))
    }
}
