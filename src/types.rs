use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub date_time: DateTime<Utc>,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming booking payload. All fields optional so that presence
/// validation produces a proper error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date_time: Option<String>,
    pub reason: Option<String>,
}

/// A candidate bookable instant. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date_time: DateTime<Utc>,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Past,
    Booked,
    Available,
}

pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, BookingError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| BookingError::InvalidDate(raw.to_owned()))
}
