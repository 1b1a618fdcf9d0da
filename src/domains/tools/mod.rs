//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `ToolDefinition` trait and typed handler adapter
//! - `validation.rs` - Argument checks against each tool's JSON schema
//! - `registry.rs` - Central tool registry and dispatch, shared by every transport
//! - `router.rs` - rmcp ToolRouter built from the registry (stdio transport)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct and a type
//!    implementing `ToolDefinition`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::builtin()`
//!
//! Every transport picks it up from the registry.

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod validation;

pub use error::{FieldIssue, INTERNAL_ERROR, INVALID_PARAMS, ToolError};
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
