use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::conflict::ConflictChecker;
use crate::error::BookingError;
use crate::storage::AppointmentStorage;
use crate::types::{parse_instant, Appointment, BookingRequest};

/// Authoritative owner of the appointment collection. The storage handle is
/// kept behind one mutex so that validate-check-append and lookup-remove each
/// run as a single non-interleaved unit.
pub struct AppointmentStore<S> {
    storage: Arc<Mutex<S>>,
    checker: ConflictChecker,
}

impl<S> Clone for AppointmentStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            checker: self.checker,
        }
    }
}

impl<S: AppointmentStorage> AppointmentStore<S> {
    pub fn new(storage: S, checker: ConflictChecker) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            checker,
        }
    }

    pub fn create(&self, request: &BookingRequest) -> Result<Appointment, BookingError> {
        let name = non_blank(&request.name);
        let email = non_blank(&request.email);
        let raw_date_time = non_blank(&request.date_time);

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if email.is_none() {
            missing.push("email");
        }
        if raw_date_time.is_none() {
            missing.push("dateTime");
        }
        let (Some(name), Some(email), Some(raw_date_time)) = (name, email, raw_date_time) else {
            return Err(BookingError::MissingFields { missing });
        };

        let date_time = parse_instant(&raw_date_time)?;

        let mut storage = self.storage.lock().unwrap();
        let mut appointments = storage.read_all()?;

        if let Some(taken) = self.checker.find_conflict(date_time, &appointments) {
            tracing::warn!(
                requested = %date_time,
                conflicting_id = taken.id,
                conflicting_time = %taken.date_time,
                "booking rejected, slot already taken"
            );
            return Err(BookingError::Conflict {
                requested_time: date_time,
            });
        }

        let appointment = Appointment {
            id: next_id(&appointments),
            name,
            email: email.to_lowercase(),
            date_time,
            reason: non_blank(&request.reason).unwrap_or_default(),
            created_at: Utc::now(),
        };

        appointments.push(appointment.clone());
        storage.write_all(&appointments)?;

        tracing::info!(id = appointment.id, date_time = %appointment.date_time, "appointment created");
        Ok(appointment)
    }

    /// Snapshot of the collection in insertion order.
    pub fn list(&self) -> Result<Vec<Appointment>, BookingError> {
        Ok(self.storage.lock().unwrap().read_all()?)
    }

    pub fn delete(&self, id: i64) -> Result<DateTime<Utc>, BookingError> {
        let mut storage = self.storage.lock().unwrap();
        let mut appointments = storage.read_all()?;

        let index = appointments
            .iter()
            .position(|appointment| appointment.id == id)
            .ok_or(BookingError::NotFound { id })?;
        appointments.remove(index);
        storage.write_all(&appointments)?;

        tracing::info!(id, "appointment deleted");
        Ok(Utc::now())
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Time-derived ids in the style of `Date.now()`, bumped past any taken value
/// so uniqueness holds even for creations within the same millisecond.
fn next_id(existing: &[Appointment]) -> i64 {
    let mut id = Utc::now().timestamp_millis();
    while existing.iter().any(|appointment| appointment.id == id) {
        id += 1;
    }
    id
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::memory_storage::MemoryStorage;

    fn store() -> AppointmentStore<MemoryStorage> {
        AppointmentStore::new(MemoryStorage::default(), ConflictChecker::default())
    }

    fn request(date_time: &str) -> BookingRequest {
        BookingRequest {
            name: Some("Ada".into()),
            email: Some("Ada@X.com".into()),
            date_time: Some(date_time.into()),
            reason: None,
        }
    }

    #[test]
    fn create_normalizes_and_lists_exactly_one_match() {
        let store = store();

        let created = store
            .create(&BookingRequest {
                name: Some("  Ada  ".into()),
                email: Some("Ada@X.com".into()),
                date_time: Some("2024-01-08T09:00:00.000Z".into()),
                reason: Some("  checkup ".into()),
            })
            .unwrap();

        assert_eq!(created.name, "Ada");
        assert_eq!(created.email, "ada@x.com");
        assert_eq!(created.reason, "checkup");
        assert_eq!(
            created.date_time,
            parse_instant("2024-01-08T09:00:00Z").unwrap()
        );

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn create_rejects_missing_fields() {
        let store = store();

        let err = store
            .create(&BookingRequest {
                name: Some("Ada".into()),
                email: Some("   ".into()),
                date_time: None,
                reason: None,
            })
            .unwrap_err();

        match err {
            BookingError::MissingFields { missing } => {
                assert_eq!(missing, vec!["email", "dateTime"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn create_rejects_unparsable_date() {
        let store = store();

        let err = store.create(&request("next tuesday")).unwrap_err();
        assert!(matches!(err, BookingError::InvalidDate(_)));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn bookings_within_tolerance_conflict() {
        let store = store();
        store.create(&request("2024-01-08T09:00:00.000Z")).unwrap();

        let err = store
            .create(&request("2024-01-08T09:00:30.000Z"))
            .unwrap_err();
        match err {
            BookingError::Conflict { requested_time } => {
                assert_eq!(
                    requested_time,
                    parse_instant("2024-01-08T09:00:30Z").unwrap()
                );
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
        assert_eq!(store.list().unwrap().len(), 1);

        store.create(&request("2024-01-08T09:05:00.000Z")).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn delete_removes_exactly_once() {
        let store = store();
        let created = store.create(&request("2024-01-08T09:00:00Z")).unwrap();

        store.delete(created.id).unwrap();
        assert!(store.list().unwrap().is_empty());

        let err = store.delete(created.id).unwrap_err();
        assert!(matches!(err, BookingError::NotFound { id } if id == created.id));
    }

    #[test]
    fn delete_unknown_id_never_mutates() {
        let store = store();
        store.create(&request("2024-01-08T09:00:00Z")).unwrap();

        store.delete(42).unwrap_err();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn ids_are_unique_even_within_one_millisecond() {
        let store = store();
        let first = store.create(&request("2024-01-08T09:00:00Z")).unwrap();
        let second = store.create(&request("2024-01-08T10:00:00Z")).unwrap();
        let third = store.create(&request("2024-01-08T11:00:00Z")).unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert_ne!(first.id, third.id);
    }

    #[test]
    fn list_is_a_defensive_snapshot() {
        let store = store();
        store.create(&request("2024-01-08T09:00:00Z")).unwrap();

        let mut snapshot = store.list().unwrap();
        snapshot.clear();

        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.list().unwrap(), store.list().unwrap());
    }
}
