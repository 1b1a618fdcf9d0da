//! Calculate tool definition.
//!
//! A tool that applies one of four arithmetic operations to two numbers.
//! Division by zero is answered with a successful text result carrying an
//! error message, not with a tool error.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::super::common::{format_number, success_result};
use crate::domains::tools::ToolDefinition;

/// Text returned when dividing by zero.
pub const DIVIDE_BY_ZERO_MESSAGE: &str = "Error: Cannot divide by zero";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Arithmetic operation supported by the calculate tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Apply the operation, returning `None` when dividing by zero.
    pub fn apply(self, a: f64, b: f64) -> Option<f64> {
        match self {
            Self::Add => Some(a + b),
            Self::Subtract => Some(a - b),
            Self::Multiply => Some(a * b),
            Self::Divide if b == 0.0 => None,
            Self::Divide => Some(a / b),
        }
    }
}

/// Parameters for the calculate tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalculateParams {
    /// Operation to perform.
    pub operation: Operation,

    /// Left-hand operand.
    pub a: f64,

    /// Right-hand operand.
    pub b: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Calculate tool - add, subtract, multiply or divide two numbers.
pub struct CalculateTool;

impl ToolDefinition for CalculateTool {
    const NAME: &'static str = "calculate";

    const DESCRIPTION: &'static str = "Perform a basic arithmetic operation (add, subtract, multiply, divide) on two numbers.";

    type Params = CalculateParams;

    #[instrument(skip_all, fields(operation = ?params.operation))]
    fn execute(params: CalculateParams) -> CallToolResult {
        info!("Calculate tool called: {:?}({}, {})", params.operation, params.a, params.b);

        match params.operation.apply(params.a, params.b) {
            Some(value) => success_result(format_number(value)),
            None => {
                warn!("Division by zero requested");
                success_result(DIVIDE_BY_ZERO_MESSAGE)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
