//! JSON-RPC handshake support
//!
//! Provides the JSON-RPC envelope types and the `initialize` capability negotiation.

pub mod rpc;
pub mod server;
