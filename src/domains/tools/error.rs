//! Tool-specific error types.

use std::fmt;

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// JSON-RPC error code for invalid method parameters.
pub const INVALID_PARAMS: i32 = -32602;

/// JSON-RPC error code for internal errors.
pub const INTERNAL_ERROR: i32 = -32603;

/// A single argument that failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Name of the offending field (`<root>` when the arguments themselves are malformed).
    pub field: String,

    /// What is wrong with it.
    pub problem: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Errors that can occur during tool registration and dispatch.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A tool with the same name was registered twice.
    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),

    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Arguments did not match the tool's input schema.
    #[error("Invalid arguments for tool '{tool}': {}", join_issues(.issues))]
    Validation {
        tool: String,
        issues: Vec<FieldIssue>,
    },

    /// Arguments passed the schema but could not be decoded into the tool's parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ToolError {
    /// Create a new "already registered" error.
    pub fn already_registered(name: impl Into<String>) -> Self {
        Self::AlreadyRegistered(name.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// The JSON-RPC error code this error is reported with.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::NotFound(_) | Self::Validation { .. } | Self::InvalidArguments(_) => {
                INVALID_PARAMS
            }
            Self::AlreadyRegistered(_) => INTERNAL_ERROR,
        }
    }

    /// Structured error data, when there is any to report.
    pub fn rpc_data(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation { tool, issues } => Some(serde_json::json!({
                "tool": tool,
                "fields": issues
                    .iter()
                    .map(|issue| serde_json::json!({
                        "field": issue.field,
                        "problem": issue.problem,
                    }))
                    .collect::<Vec<_>>(),
            })),
            _ => None,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let data = err.rpc_data();
        if err.rpc_code() == INVALID_PARAMS {
            McpError::invalid_params(err.to_string(), data)
        } else {
            McpError::internal_error(err.to_string(), data)
        }
    }
}
