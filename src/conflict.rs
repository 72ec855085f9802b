use chrono::{DateTime, Duration, Utc};

use crate::types::Appointment;

/// Two instants conflict when they lie strictly closer together than the
/// tolerance window. A zero tolerance degrades to exact-match checking.
#[derive(Debug, Clone, Copy)]
pub struct ConflictChecker {
    tolerance: Duration,
}

impl Default for ConflictChecker {
    fn default() -> Self {
        Self::new(Duration::seconds(60))
    }
}

impl ConflictChecker {
    pub fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    pub fn find_conflict<'a>(
        &self,
        candidate: DateTime<Utc>,
        existing: &'a [Appointment],
    ) -> Option<&'a Appointment> {
        existing
            .iter()
            .find(|appointment| (appointment.date_time - candidate).abs() < self.tolerance)
    }
}
