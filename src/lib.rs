//! Authless Calculator MCP Server
//!
//! A Model Context Protocol server exposing a small calculator and a
//! read-only course catalog as MCP tools, reachable without authentication.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **courses**: the static course and assignment catalog
//!   - **tools**: tool definitions, argument validation and the tool registry
//!
//! # Example
//!
//! ```rust,no_run
//! use calculator_mcp_server::{Config, McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
