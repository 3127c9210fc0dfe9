use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing roster mutations.
#[derive(Default)]
pub struct RosterMetrics {
    students_registered: AtomicU64,
    courses_enrolled: AtomicU64,
    courses_removed: AtomicU64,
}

impl RosterMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful student registration.
    pub fn record_student(&self) {
        self.students_registered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a course appended to a student.
    pub fn record_enrollment(&self) {
        self.courses_enrolled.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a course removed from a student.
    pub fn record_removal(&self) {
        self.courses_removed.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            students_registered: self.students_registered.load(Ordering::Relaxed),
            courses_enrolled: self.courses_enrolled.load(Ordering::Relaxed),
            courses_removed: self.courses_removed.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of mutation counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Students registered since startup (seeded students excluded).
    pub students_registered: u64,
    /// Courses enrolled since startup.
    pub courses_enrolled: u64,
    /// Courses removed since startup.
    pub courses_removed: u64,
}
