//! List courses tool definition.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::json_result;
use crate::domains::courses::{self, CourseSummary};
use crate::domains::tools::ToolDefinition;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list courses tool (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListCoursesParams {}

// ============================================================================
// Tool Definition
// ============================================================================

/// List courses tool - every course in the catalog, in catalog order.
pub struct ListCoursesTool;

impl ToolDefinition for ListCoursesTool {
    const NAME: &'static str = "list_courses";

    const DESCRIPTION: &'static str =
        "List all available courses with their id, name and instructor, as JSON.";

    type Params = ListCoursesParams;

    #[instrument(skip_all)]
    fn execute(_params: ListCoursesParams) -> CallToolResult {
        let summaries: Vec<CourseSummary> = courses::courses().iter().map(Into::into).collect();
        info!("Listing {} courses", summaries.len());
        json_result(&summaries)
    }
}

// ============================================================================
// Tests
// ============================================================================
