use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::storage::{AppointmentStorage, StorageError};
use crate::types::{parse_instant, Appointment};

pub struct MockStorageInner {
    pub success: AtomicBool,
    pub calls_to_read_all: AtomicU64,
    pub calls_to_write_all: AtomicU64,
    pub appointments: Mutex<Vec<Appointment>>,
}

#[derive(Clone)]
pub struct MockStorage(pub Arc<MockStorageInner>);

impl MockStorage {
    pub fn new() -> Self {
        Self(Arc::new(MockStorageInner {
            success: AtomicBool::new(true),
            calls_to_read_all: AtomicU64::default(),
            calls_to_write_all: AtomicU64::default(),
            appointments: Mutex::default(),
        }))
    }

    /// Seeds an appointment directly, bypassing the store's checks.
    pub fn push(&self, id: i64, date_time: &str) {
        self.0.appointments.lock().unwrap().push(Appointment {
            id,
            name: "Ada".into(),
            email: "ada@x.com".into(),
            date_time: parse_instant(date_time).unwrap(),
            reason: String::new(),
            created_at: Utc::now(),
        });
    }

    fn check_success(&self) -> Result<(), StorageError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StorageError::Io(std::io::Error::other("supposed to fail"))),
        }
    }
}

impl AppointmentStorage for MockStorage {
    fn read_all(&mut self) -> Result<Vec<Appointment>, StorageError> {
        self.0.calls_to_read_all.fetch_add(1, Ordering::SeqCst);
        self.check_success()?;
        Ok(self.0.appointments.lock().unwrap().clone())
    }

    fn write_all(&mut self, appointments: &[Appointment]) -> Result<(), StorageError> {
        self.0.calls_to_write_all.fetch_add(1, Ordering::SeqCst);
        self.check_success()?;
        *self.0.appointments.lock().unwrap() = appointments.to_vec();
        Ok(())
    }
}
