//! Request decoding, function contracts and dispatch
//!
//! Provides the core request handling that sits between the HTTP transport and the tool
//! providers.

pub mod functions;
pub mod reply;
pub mod request;
pub mod utils;
