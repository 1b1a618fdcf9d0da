//! Transport layer for the MCP server.
//!
//! This module provides the transport implementations:
//! - **HTTP**: one axum server with two MCP transports - feature: `http`
//!   - `GET /sse` + `POST /sse/message`: SSE (HTTP+SSE) transport
//!   - `POST /mcp`: streamable-HTTP (direct request/response) transport
//! - **STDIO**: Standard input/output for local clients - feature: `stdio`
//!
//! The HTTP transports share the JSON-RPC dispatcher in [`jsonrpc`]; the
//! STDIO transport is driven by rmcp.
//!
//! # Feature Flags
//!
//! - `http` (default): HTTP transports - adds axum, tower-http, uuid
//! - `stdio`: STDIO transport - minimal dependencies

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub mod jsonrpc;

#[cfg(feature = "http")]
pub mod sse;

#[cfg(feature = "http")]
pub mod streamable;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
