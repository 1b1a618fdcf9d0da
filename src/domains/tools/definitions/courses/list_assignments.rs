//! List assignments tool definition.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::{json_result, success_result};
use crate::domains::courses;
use crate::domains::tools::ToolDefinition;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list assignments tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListAssignmentsParams {
    /// Identifier of the course whose assignments to list.
    pub course_id: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List assignments tool - the assignments of one course, in due order.
pub struct ListAssignmentsTool;

impl ToolDefinition for ListAssignmentsTool {
    const NAME: &'static str = "list_assignments";

    const DESCRIPTION: &'static str = "List the assignments of a course by course id, as JSON.";

    type Params = ListAssignmentsParams;

    #[instrument(skip_all, fields(course_id = %params.course_id))]
    fn execute(params: ListAssignmentsParams) -> CallToolResult {
        // Unknown course and course without assignments read the same.
        match courses::assignments_for(&params.course_id) {
            Some(assignments) => {
                info!("Listing {} assignments", assignments.len());
                json_result(assignments)
            }
            None => success_result(format!(
                "No assignments found for course '{}' or course does not exist",
                params.course_id
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
