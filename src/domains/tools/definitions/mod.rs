//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod arithmetic;
pub mod common;
pub mod courses;

pub use arithmetic::{AddParams, AddTool, CalculateParams, CalculateTool, Operation};
pub use courses::{
    GetCourseParams, GetCourseTool, ListAssignmentsParams, ListAssignmentsTool, ListCoursesParams,
    ListCoursesTool,
};
