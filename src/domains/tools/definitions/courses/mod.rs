//! Course lookup tools.
//!
//! All three tools read the static catalog in `domains::courses`. Lookups
//! that miss are answered with a successful text message naming the
//! requested id, never with an error result.

pub mod get_course;
pub mod list_assignments;
pub mod list_courses;

pub use get_course::{GetCourseParams, GetCourseTool};
pub use list_assignments::{ListAssignmentsParams, ListAssignmentsTool};
pub use list_courses::{ListCoursesParams, ListCoursesTool};
