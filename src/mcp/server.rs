//! JSON-RPC handshake handling
//!
//! Only `initialize` is understood. It answers with a fixed capability descriptor; every
//! other method is rejected with "Method not found". No session state is kept.

use axum::http::StatusCode;
use rust_mcp_sdk::schema::{Implementation, ProtocolVersion};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::domain::reply::Reply;
use crate::mcp::rpc::{json_rpc_error, json_rpc_result, RpcEnvelope, METHOD_NOT_FOUND};

pub fn supported_protocol_version() -> String {
    ProtocolVersion::V2024_11_05.into()
}

pub fn server_info() -> Implementation {
    Implementation {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        title: None,
        description: None,
        icons: vec![],
        website_url: None,
    }
}

pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": supported_protocol_version(),
        "capabilities": {
            "sampling": {},
            "logging": {},
            "roots": {
                "listChanged": false
            },
            "prompts": {
                "listChanged": false
            },
            "resources": {
                "subscribe": false,
                "listChanged": false
            },
            "tools": {
                "listChanged": false
            }
        },
        "serverInfo": server_info()
    })
}

pub fn handle_rpc_call(fields: &Map<String, Value>) -> Reply {
    let id = fields.get("id").cloned().unwrap_or(Value::Null);
    let method = fields.get("method").and_then(Value::as_str).unwrap_or_default();

    let envelope = rpc_response(method, id);
    let status = if envelope.is_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    info!(
        method = %method,
        outcome = if envelope.is_error() { "failure" } else { "success" },
        "json-rpc call handled"
    );

    Reply::rpc(status, envelope)
}

fn rpc_response(method: &str, id: Value) -> RpcEnvelope {
    match method {
        "initialize" => json_rpc_result(id, initialize_result()),
        _ => json_rpc_error(id, METHOD_NOT_FOUND, "Method not found"),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Map, Value};

    use super::handle_rpc_call;
    use crate::domain::reply::Envelope;
    use crate::mcp::rpc::{RpcOutcome, METHOD_NOT_FOUND};

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object fixture")
    }

    fn rpc_parts(reply: crate::domain::reply::Reply) -> (StatusCode, RpcOutcome, Value) {
        match reply.envelope {
            Envelope::Rpc(envelope) => (reply.status, envelope.outcome, envelope.id),
            Envelope::Direct(other) => panic!("expected rpc envelope, got {other:?}"),
        }
    }

    #[test]
    fn initialize_echoes_numeric_id() {
        let (status, outcome, id) = rpc_parts(handle_rpc_call(&fields(
            json!({"jsonrpc": "2.0", "method": "initialize", "params": {}, "id": 42}),
        )));

        assert_eq!(status, StatusCode::OK);
        assert_eq!(id, json!(42));
        let RpcOutcome::Result(result) = outcome else {
            panic!("expected result outcome");
        };
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], env!("CARGO_PKG_NAME"));
        for capability in ["sampling", "logging", "roots", "prompts", "resources", "tools"] {
            assert!(
                result["capabilities"][capability].is_object(),
                "missing capability {capability}"
            );
        }
    }

    #[test]
    fn initialize_echoes_string_and_null_ids() {
        let (_, _, id) = rpc_parts(handle_rpc_call(&fields(
            json!({"jsonrpc": "2.0", "method": "initialize", "id": "abc"}),
        )));
        assert_eq!(id, json!("abc"));

        let (_, _, id) = rpc_parts(handle_rpc_call(&fields(
            json!({"jsonrpc": "2.0", "method": "initialize", "id": null}),
        )));
        assert_eq!(id, Value::Null);
    }

    #[test]
    fn missing_id_is_reported_as_null() {
        let (_, _, id) = rpc_parts(handle_rpc_call(&fields(
            json!({"jsonrpc": "2.0", "method": "initialize"}),
        )));
        assert_eq!(id, Value::Null);
    }

    #[test]
    fn other_methods_are_not_found() {
        let (status, outcome, id) = rpc_parts(handle_rpc_call(&fields(
            json!({"jsonrpc": "2.0", "method": "shutdown", "id": 9}),
        )));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(id, json!(9));
        let RpcOutcome::Error(error) = outcome else {
            panic!("expected error outcome");
        };
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found");
    }

    #[test]
    fn jsonrpc_value_is_not_checked() {
        let (status, outcome, id) = rpc_parts(handle_rpc_call(&fields(
            json!({"jsonrpc": 2.0, "method": "initialize", "id": 1}),
        )));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(id, json!(1));
        assert!(matches!(outcome, RpcOutcome::Result(_)));

        let (status, outcome, _) = rpc_parts(handle_rpc_call(&fields(
            json!({"jsonrpc": "1.0", "method": "shutdown", "id": 1}),
        )));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let RpcOutcome::Error(error) = outcome else {
            panic!("expected error outcome");
        };
        assert_eq!(error.code, METHOD_NOT_FOUND);
    }

    #[test]
    fn missing_method_is_not_found() {
        let (status, outcome, _) = rpc_parts(handle_rpc_call(&fields(
            json!({"jsonrpc": "2.0", "id": 3}),
        )));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let RpcOutcome::Error(error) = outcome else {
            panic!("expected error outcome");
        };
        assert_eq!(error.code, METHOD_NOT_FOUND);
    }
}
