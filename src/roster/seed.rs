//! Initial dataset loaded at process start.

use super::types::{Course, Student};

fn ide_course() -> Course {
    Course::new(
        "DEVE709",
        "IDE",
        "Utilisation des IDE",
        &["Learn Maven", "NetBeans", "Integration tests", "Coverage"],
    )
}

/// Students present when the server starts with seeding enabled.
///
/// Each student receives its own copy of shared course records.
pub(crate) fn initial_students() -> Vec<Student> {
    vec![
        Student::new(
            "S-001",
            "Luc Labbé",
            "Senior Developer",
            vec![
                ide_course(),
                Course::new(
                    "DEVE710",
                    "CI",
                    "Integration Continue",
                    &["Jenkins", "Coverage", "Tests"],
                ),
                Course::new(
                    "BDOE571",
                    "SQL",
                    "SQL Sous Oracle",
                    &["SQL", "PL/SQL", "Triggers"],
                ),
                Course::new(
                    "DEVE571",
                    "Java",
                    "Les fondamentaux",
                    &["Variables", "Boucles", "JVM", "Exceptions"],
                ),
            ],
        ),
        Student::new(
            "S-002",
            "Thomas Gallinari",
            "Mobile Developer",
            vec![ide_course()],
        ),
    ]
}
