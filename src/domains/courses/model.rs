//! Course and assignment records.

use serde::Serialize;

/// A course in the catalog.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: &'static str,
    pub name: &'static str,
    pub instructor: &'static str,
    pub description: &'static str,
    pub credits: u32,
}

/// The listing view of a course, as returned by `list_courses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub instructor: &'static str,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            instructor: course.instructor,
        }
    }
}

/// A graded assignment belonging to a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub id: &'static str,
    pub title: &'static str,
    /// Calendar date, `YYYY-MM-DD`.
    pub due_date: &'static str,
    pub points: u32,
}
