//! Add tool definition.
//!
//! A tool that returns the sum of two numbers as text.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::{format_number, success_result};
use crate::domains::tools::ToolDefinition;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    /// First addend.
    pub a: f64,

    /// Second addend.
    pub b: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add tool - sums two numbers.
pub struct AddTool;

impl ToolDefinition for AddTool {
    const NAME: &'static str = "add";

    const DESCRIPTION: &'static str = "Add two numbers and return the sum.";

    type Params = AddParams;

    #[instrument(skip_all, fields(a = params.a, b = params.b))]
    fn execute(params: AddParams) -> CallToolResult {
        info!("Add tool called");
        success_result(format_number(params.a + params.b))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(a: f64, b: f64) -> String {
        let result = AddTool::execute(AddParams { a, b });
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_add_integers() {
        assert_eq!(run(2.0, 3.0), "5");
        assert_eq!(run(-4.0, 4.0), "0");
    }

    #[test]
    fn test_add_fractions() {
        assert_eq!(run(1.5, 2.25), "3.75");
        assert_eq!(run(0.1, 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_add_matches_float_sum() {
        for (a, b) in [(10.0, 32.0), (-1.25, 0.5), (1e10, 7.0), (-3.0, -9.5)] {
            assert_eq!(run(a, b), format_number(a + b));
        }
    }

    #[test]
    fn test_add_overflow() {
        assert_eq!(run(f64::MAX, f64::MAX), "Infinity");
    }
}
