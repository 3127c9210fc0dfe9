//! Registry holding every student and course, plus the trait the HTTP layer depends on.

use super::seed::initial_students;
use super::types::{Course, Rejection, Student};
use crate::metrics::{MetricsSnapshot, RosterMetrics};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Operations the HTTP surface needs from the roster.
///
/// Absence is reported as `None` rather than an error: an unknown student or course is an
/// expected outcome that callers translate into their own response shape.
pub trait RosterApi: Send + Sync {
    /// All students in registration order.
    fn list_students(&self) -> Vec<Student>;

    /// Student with the exact identifier, if registered.
    fn find_student(&self, student_id: &str) -> Option<Student>;

    /// Courses of the given student in enrollment order.
    fn list_courses(&self, student_id: &str) -> Option<Vec<Course>>;

    /// First course of the student whose identifier matches.
    fn find_course(&self, student_id: &str, course_id: &str) -> Option<Course>;

    /// Append a course to the student's list and return the stored record.
    fn add_course(&self, student_id: &str, course: Course) -> Option<Course>;

    /// Remove the first matching course; `true` when something was removed.
    fn delete_course(&self, student_id: &str, course_id: &str) -> bool;

    /// Register a new student.
    fn add_student(&self, student: Student) -> Result<Student, Rejection>;

    /// Current mutation counters.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// In-memory roster shared by every request handler.
///
/// Build one at process start and hand it to the router through an `Arc`. Reads share a
/// read lock for the whole scan; mutations hold the write lock.
#[derive(Default)]
pub struct Roster {
    students: RwLock<Vec<Student>>,
    metrics: RosterMetrics,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a roster pre-populated with the startup dataset.
    pub fn seeded() -> Self {
        Self::with_students(initial_students())
    }

    /// Create a roster from an explicit list of students, preserving their order.
    pub fn with_students(students: Vec<Student>) -> Self {
        Self {
            students: RwLock::new(students),
            metrics: RosterMetrics::new(),
        }
    }

    // The backing Vec stays structurally valid even if a holder panicked, so poisoning is
    // ignored.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Student>> {
        self.students.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Student>> {
        self.students.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RosterApi for Roster {
    fn list_students(&self) -> Vec<Student> {
        self.read().clone()
    }

    fn find_student(&self, student_id: &str) -> Option<Student> {
        let students = self.read();
        let found = students.iter().find(|s| s.has_id(student_id)).cloned();
        tracing::trace!(student_id, found = found.is_some(), "Student lookup");
        found
    }

    fn list_courses(&self, student_id: &str) -> Option<Vec<Course>> {
        self.read()
            .iter()
            .find(|s| s.has_id(student_id))
            .map(|s| s.courses.clone())
    }

    fn find_course(&self, student_id: &str, course_id: &str) -> Option<Course> {
        self.read()
            .iter()
            .find(|s| s.has_id(student_id))?
            .courses
            .iter()
            .find(|c| c.has_id(course_id))
            .cloned()
    }

    fn add_course(&self, student_id: &str, course: Course) -> Option<Course> {
        let mut students = self.write();
        let Some(student) = students.iter_mut().find(|s| s.has_id(student_id)) else {
            tracing::debug!(student_id, "Enrollment skipped: unknown student");
            return None;
        };
        student.courses.push(course.clone());
        drop(students);

        self.metrics.record_enrollment();
        tracing::info!(student_id, course_id = ?course.id, "Course enrolled");
        Some(course)
    }

    fn delete_course(&self, student_id: &str, course_id: &str) -> bool {
        let mut students = self.write();
        let Some(student) = students.iter_mut().find(|s| s.has_id(student_id)) else {
            tracing::debug!(student_id, course_id, "Removal skipped: unknown student");
            return false;
        };
        let Some(position) = student.courses.iter().position(|c| c.has_id(course_id)) else {
            tracing::debug!(student_id, course_id, "Removal skipped: unknown course");
            return false;
        };
        student.courses.remove(position);
        drop(students);

        self.metrics.record_removal();
        tracing::info!(student_id, course_id, "Course removed");
        true
    }

    fn add_student(&self, student: Student) -> Result<Student, Rejection> {
        if student.id.as_deref().is_none_or(str::is_empty) {
            tracing::debug!("Student registration rejected: missing identifier");
            return Err(Rejection::MissingIdentifier);
        }
        // TODO: decide whether duplicate identifiers should be refused once clients agree.
        self.write().push(student.clone());

        self.metrics.record_student();
        tracing::info!(student_id = ?student.id, "Student registered");
        Ok(student)
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
