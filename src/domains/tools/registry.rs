//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is built once at startup and shared read-only between
//! every transport. It provides:
//! - Registration with duplicate-name detection
//! - Schema-checked dispatch of tool calls
//! - Tool metadata for listing, in registration order

use std::collections::HashMap;

use rmcp::model::{CallToolResult, Tool};
use tracing::{debug, warn};

use super::definitions::{
    AddTool, CalculateTool, GetCourseTool, ListAssignmentsTool, ListCoursesTool,
};
use super::error::ToolError;
use super::handlers::{ToolDefinition, ToolHandler, typed_handler};

/// A registered tool: its metadata and its handler.
struct RegisteredTool {
    tool: Tool,
    handler: ToolHandler,
}

/// Tool registry - maps tool names to schemas and handlers.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in tool.
    pub fn builtin() -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register_definition::<AddTool>()?;
        registry.register_definition::<CalculateTool>()?;
        registry.register_definition::<ListCoursesTool>()?;
        registry.register_definition::<GetCourseTool>()?;
        registry.register_definition::<ListAssignmentsTool>()?;
        Ok(registry)
    }

    /// Register a tool with an untyped handler.
    ///
    /// Fails if a tool with the same name is already registered.
    pub fn register(&mut self, tool: Tool, handler: ToolHandler) -> Result<(), ToolError> {
        let name = tool.name.to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::already_registered(name));
        }

        debug!("Registering tool: {}", name);
        self.index.insert(name, self.tools.len());
        self.tools.push(RegisteredTool { tool, handler });
        Ok(())
    }

    /// Register a typed tool definition.
    pub fn register_definition<T: ToolDefinition>(&mut self) -> Result<(), ToolError> {
        let tool = T::to_tool();
        let handler = typed_handler::<T>(&tool);
        self.register(tool, handler)
    }

    /// Get all tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.tool.name.as_ref()).collect()
    }

    /// Get all tools as Tool models (metadata), in registration order.
    pub fn list(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.tool.clone()).collect()
    }

    /// Look up the metadata of a single tool.
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&i| &self.tools[i].tool)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tool is registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Missing arguments (`null`) are treated as an empty object.
    pub fn dispatch(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        let Some(&i) = self.index.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let arguments = match arguments {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };

        (self.tools[i].handler)(arguments).inspect_err(|e| warn!("Tool {} failed: {}", name, e))
    }
}
