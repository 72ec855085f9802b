use std::fs;
use std::path::PathBuf;

use crate::storage::{AppointmentStorage, StorageError};
use crate::types::Appointment;

/// Persists the whole collection as a pretty-printed JSON array in a single
/// file, created as `[]` when absent.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if !path.exists() {
            fs::write(&path, "[]")?;
        }
        Ok(Self { path })
    }
}

impl AppointmentStorage for FileStorage {
    fn read_all(&mut self) -> Result<Vec<Appointment>, StorageError> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&mut self, appointments: &[Appointment]) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(appointments)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
