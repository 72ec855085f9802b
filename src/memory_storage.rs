use crate::storage::{AppointmentStorage, StorageError};
use crate::types::Appointment;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    appointments: Vec<Appointment>,
}

impl AppointmentStorage for MemoryStorage {
    fn read_all(&mut self) -> Result<Vec<Appointment>, StorageError> {
        Ok(self.appointments.clone())
    }

    fn write_all(&mut self, appointments: &[Appointment]) -> Result<(), StorageError> {
        self.appointments = appointments.to_vec();
        Ok(())
    }
}
