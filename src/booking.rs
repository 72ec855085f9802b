use chrono::{DateTime, Utc};

use crate::conflict::ConflictChecker;
use crate::error::BookingError;
use crate::slots;
use crate::storage::AppointmentStorage;
use crate::store::AppointmentStore;
use crate::types::{parse_instant, Appointment, BookingRequest, Slot, SlotStatus};

/// Composes slot generation, conflict checking and the store into the
/// contract the HTTP layer consumes.
pub struct BookingService<S> {
    store: AppointmentStore<S>,
    checker: ConflictChecker,
}

impl<S> Clone for BookingService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            checker: self.checker,
        }
    }
}

impl<S: AppointmentStorage> BookingService<S> {
    pub fn new(storage: S, checker: ConflictChecker) -> Self {
        Self {
            store: AppointmentStore::new(storage, checker),
            checker,
        }
    }

    pub fn create(&self, request: &BookingRequest) -> Result<Appointment, BookingError> {
        self.store.create(request)
    }

    pub fn list(&self) -> Result<Vec<Appointment>, BookingError> {
        self.store.list()
    }

    pub fn delete(&self, id: i64) -> Result<DateTime<Utc>, BookingError> {
        self.store.delete(id)
    }

    /// Appointments strictly after `reference`, ascending by instant.
    pub fn list_upcoming(
        &self,
        reference: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, BookingError> {
        let mut upcoming: Vec<Appointment> = self
            .store
            .list()?
            .into_iter()
            .filter(|appointment| appointment.date_time > reference)
            .collect();
        upcoming.sort_by_key(|appointment| appointment.date_time);
        Ok(upcoming)
    }

    /// Appointments with instants in the inclusive range `[start, end]`,
    /// ascending by instant.
    pub fn list_in_range(&self, start: &str, end: &str) -> Result<Vec<Appointment>, BookingError> {
        let start = parse_instant(start)?;
        let end = parse_instant(end)?;
        if start > end {
            return Err(BookingError::InvalidRange);
        }

        let mut in_range: Vec<Appointment> = self
            .store
            .list()?
            .into_iter()
            .filter(|appointment| appointment.date_time >= start && appointment.date_time <= end)
            .collect();
        in_range.sort_by_key(|appointment| appointment.date_time);
        Ok(in_range)
    }

    /// The weekly slot grid with display status. Booked wins over past so a
    /// taken slot earlier in the week still renders as booked.
    pub fn week_slots(
        &self,
        reference: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Slot>, BookingError> {
        let appointments = self.store.list()?;

        Ok(slots::week_slots(reference)
            .into_iter()
            .map(|date_time| {
                let status = if self.checker.find_conflict(date_time, &appointments).is_some() {
                    SlotStatus::Booked
                } else if date_time < now {
                    SlotStatus::Past
                } else {
                    SlotStatus::Available
                };
                Slot { date_time, status }
            })
            .collect())
    }
}
