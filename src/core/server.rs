//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler. Tool metadata and dispatch
//! live in the shared [`ToolRegistry`]; the HTTP transports call into it via
//! [`McpServer::call_tool`], the stdio transport through the rmcp
//! `ToolRouter` built from the same registry.

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo, Tool},
    tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result as CoreResult;
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};

/// Instructions sent to clients on initialization.
const INSTRUCTIONS: &str = "Calculator and course lookup tools. Use `add` or `calculate` for arithmetic, \
     and `list_courses`, `get_course` and `list_assignments` to browse the course catalog.";

/// The main MCP server handler.
///
/// Cheap to clone; every clone shares the same configuration and registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry of every available tool.
    registry: Arc<ToolRegistry>,

    /// Tool router for rmcp-managed transports.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the built-in tools.
    pub fn new(config: Config) -> CoreResult<Self> {
        Ok(Self::with_registry(config, ToolRegistry::builtin()?))
    }

    /// Create a server around an already-populated registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// List all available tools, in registration order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.list()
    }

    /// Call a tool by name.
    #[instrument(skip(self, arguments))]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        info!("Calling tool: {}", name);
        self.registry.dispatch(name, arguments)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_server_identity() {
        let server = server();
        assert_eq!(server.name(), "Authless Calculator");
        assert_eq!(server.version(), "1.0.0");

        let info = server.get_info();
        assert_eq!(info.server_info.name, "Authless Calculator");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
    }

    #[test]
    fn test_list_tools_in_order() {
        let names: Vec<_> = server()
            .list_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(
            names,
            ["add", "calculate", "list_courses", "get_course", "list_assignments"]
        );
    }

    #[test]
    fn test_call_tool() {
        let result = server()
            .call_tool("get_course", serde_json::json!({ "course_id": "eng301" }))
            .unwrap();
        match &result.content[0].raw {
            RawContent::Text(text) => assert!(text.text.contains("Dr. Brown")),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_handler_router_serves_registry_tools() {
        let server = server();
        let routed: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        let listed: Vec<_> = server
            .list_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(routed.len(), listed.len());
        for name in &listed {
            assert!(routed.contains(name), "{} missing from handler router", name);
        }
    }

    #[test]
    fn test_custom_registry() {
        let server = McpServer::with_registry(Config::default(), ToolRegistry::new());
        assert!(server.list_tools().is_empty());
        assert!(server.call_tool("add", serde_json::json!({})).is_err());
    }
}
