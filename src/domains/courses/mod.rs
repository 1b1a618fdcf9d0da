//! Courses domain module.
//!
//! Read-only mock data for the course lookup tools. Everything here is a
//! compile-time literal; nothing is loaded, cached or mutated at runtime.

mod catalog;
mod model;

pub use catalog::{assignments_for, courses, find_course};
pub use model::{Assignment, Course, CourseSummary};
