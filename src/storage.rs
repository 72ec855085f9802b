use crate::types::Appointment;

/// Read-all / write-all persistence capability the store depends on.
/// Implementations do not enforce any booking rules; the store holds the
/// lock across a read-check-write sequence, so calls never interleave.
pub trait AppointmentStorage: Send + 'static {
    fn read_all(&mut self) -> Result<Vec<Appointment>, StorageError>;
    fn write_all(&mut self, appointments: &[Appointment]) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
