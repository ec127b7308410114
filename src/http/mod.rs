//! HTTP transport layer
//!
//! Provides the dispatch endpoint handlers and the buffered/event-stream response framing.

pub mod handlers;
pub mod transport;
