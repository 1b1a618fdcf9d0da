//! Get course tool definition.

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

/// Parameters for the get course tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCourseParams {
    /// Identifier of the course (e.g. "cs101").
    pub course_id: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Get course tool - full details of a single course.
pub struct GetCourseTool;

impl ToolDefinition for GetCourseTool {
    const NAME: &'static str = "get_course";

    const DESCRIPTION: &'static str = "Get the full details of a course by its id, as JSON.";

    type Params = GetCourseParams;

    #[instrument(skip_all, fields(course_id = %params.course_id))]
    fn execute(params: GetCourseParams) -> CallToolResult {
        match courses::find_course(&params.course_id) {
            Some(course) => {
                info!("Found course {}", course.id);
                json_result(course)
            }
            None => {
                info!("Course {} not found", params.course_id);
                success_result(format!("Course with ID '{}' not found", params.course_id))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
