//! Static course catalog.

use super::model::{Assignment, Course};

static COURSES: [Course; 3] = [
    Course {
        id: "cs101",
        name: "Introduction to Computer Science",
        instructor: "Dr. Smith",
        description: "Basic concepts of computer science and programming",
        credits: 3,
    },
    Course {
        id: "math201",
        name: "Calculus II",
        instructor: "Prof. Johnson",
        description: "Advanced calculus topics including integration and series",
        credits: 4,
    },
    Course {
        id: "eng301",
        name: "Software Engineering",
        instructor: "Dr. Brown",
        description: "Software development methodologies and project management",
        credits: 3,
    },
];

// Every key must name a course in COURSES.
static ASSIGNMENTS: [(&str, &[Assignment]); 3] = [
    (
        "cs101",
        &[
            Assignment {
                id: "hw1",
                title: "Variables and Data Types",
                due_date: "2025-10-15",
                points: 100,
            },
            Assignment {
                id: "hw2",
                title: "Control Structures",
                due_date: "2025-10-29",
                points: 100,
            },
            Assignment {
                id: "midterm",
                title: "Midterm Exam",
                due_date: "2025-11-12",
                points: 200,
            },
        ],
    ),
    (
        "math201",
        &[
            Assignment {
                id: "quiz1",
                title: "Integration Techniques",
                due_date: "2025-10-10",
                points: 50,
            },
            Assignment {
                id: "hw3",
                title: "Series and Sequences",
                due_date: "2025-10-24",
                points: 100,
            },
            Assignment {
                id: "final",
                title: "Final Exam",
                due_date: "2025-12-15",
                points: 300,
            },
        ],
    ),
    (
        "eng301",
        &[
            Assignment {
                id: "proj1",
                title: "Requirements Analysis",
                due_date: "2025-10-20",
                points: 150,
            },
            Assignment {
                id: "proj2",
                title: "System Design",
                due_date: "2025-11-10",
                points: 200,
            },
            Assignment {
                id: "proj3",
                title: "Implementation and Testing",
                due_date: "2025-12-05",
                points: 250,
            },
        ],
    ),
];

/// All courses, in catalog order.
pub fn courses() -> &'static [Course] {
    &COURSES
}

/// Look up a course by its identifier.
pub fn find_course(course_id: &str) -> Option<&'static Course> {
    COURSES.iter().find(|course| course.id == course_id)
}

/// Assignments for a course, in due order.
///
/// Returns `None` both for unknown courses and for courses without an
/// assignment group.
pub fn assignments_for(course_id: &str) -> Option<&'static [Assignment]> {
    ASSIGNMENTS
        .iter()
        .find(|(id, _)| *id == course_id)
        .map(|(_, assignments)| *assignments)
}
