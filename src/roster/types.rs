//! Records held by the roster and the rejection raised for malformed registrations.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A course owned by exactly one student.
///
/// Course identifiers are only unique within the owning student's list. A course without an
/// identifier can be stored but is never returned by lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Identifier within the owning student's course list.
    #[serde(default)]
    pub id: Option<String>,
    /// Short course title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Ordered list of learning steps.
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
}

impl Course {
    /// Build a course from borrowed parts.
    pub fn new(id: &str, name: &str, description: &str, steps: &[&str]) -> Self {
        Self {
            id: Some(id.to_string()),
            name: name.to_string(),
            description: description.to_string(),
            steps: steps.iter().map(|step| step.to_string()).collect(),
        }
    }

    pub(crate) fn has_id(&self, course_id: &str) -> bool {
        self.id.as_deref() == Some(course_id)
    }
}

/// A student together with the courses they own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Externally assigned identifier such as `S-001`.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Owned courses in enrollment order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<Course>,
}

impl Student {
    /// Build a student from borrowed parts.
    pub fn new(id: &str, name: &str, description: &str, courses: Vec<Course>) -> Self {
        Self {
            id: Some(id.to_string()),
            name: name.to_string(),
            description: description.to_string(),
            courses,
        }
    }

    pub(crate) fn has_id(&self, student_id: &str) -> bool {
        self.id.as_deref() == Some(student_id)
    }
}

/// Reasons a student registration is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No student record was supplied.
    #[error("a student record is required")]
    MissingStudent,
    /// The student record carries no usable identifier.
    #[error("student identifier must not be empty")]
    MissingIdentifier,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_serializes_with_expected_field_names() {
        let course = Course::new("DEVE709", "IDE", "Utilisation des IDE", &["Learn Maven"]);
        let value = serde_json::to_value(&course).expect("serialize course");
        assert_eq!(
            value,
            json!({
                "id": "DEVE709",
                "name": "IDE",
                "description": "Utilisation des IDE",
                "steps": ["Learn Maven"]
            })
        );
    }

    #[test]
    fn null_fields_deserialize_to_empty_values() {
        let student: Student = serde_json::from_value(json!({
            "id": null,
            "name": null,
            "description": null,
            "courses": null
        }))
        .expect("deserialize student");
        assert_eq!(student, Student::default());
    }

    #[test]
    fn missing_fields_deserialize_to_empty_values() {
        let course: Course = serde_json::from_value(json!({ "id": "C1" })).expect("course");
        assert_eq!(course.id.as_deref(), Some("C1"));
        assert!(course.name.is_empty());
        assert!(course.steps.is_empty());
    }

    #[test]
    fn course_without_id_never_matches() {
        let course = Course::default();
        assert!(!course.has_id(""));
        assert!(!course.has_id("DEVE709"));
    }
}
