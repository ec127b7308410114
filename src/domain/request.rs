//! Inbound request decoding and classification

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::errors::DispatchError;

/// A decoded request, classified by the presence of a `jsonrpc` key.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Direct(Map<String, Value>),
    Rpc(Map<String, Value>),
}

/// Decodes the request body, falling back to query parameters when there is no body.
///
/// `query` is `None` when the query string could not be decoded.
pub fn parse_request(
    body: &[u8],
    query: Option<BTreeMap<String, String>>,
) -> Result<Inbound, DispatchError> {
    let decoded = if has_body(body) {
        serde_json::from_slice::<Value>(body)
            .map_err(|_| DispatchError::MalformedRequest(DispatchError::INVALID_JSON))?
    } else {
        let query =
            query.ok_or(DispatchError::MalformedRequest(DispatchError::INVALID_QUERY))?;
        query_to_value(query)
    };

    let Value::Object(fields) = decoded else {
        return Err(DispatchError::MalformedRequest(
            DispatchError::NOT_AN_OBJECT,
        ));
    };

    if fields.contains_key("jsonrpc") {
        Ok(Inbound::Rpc(fields))
    } else {
        Ok(Inbound::Direct(fields))
    }
}

fn has_body(body: &[u8]) -> bool {
    !body.iter().all(u8::is_ascii_whitespace)
}

fn query_to_value(query: BTreeMap<String, String>) -> Value {
    if query.is_empty() {
        return Value::Null;
    }

    Value::Object(
        query
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    )
}
