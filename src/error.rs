use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing required fields")]
    MissingFields { missing: Vec<&'static str> },

    #[error("invalid dateTime: {0}")]
    InvalidDate(String),

    #[error("invalid range: start must not be after end")]
    InvalidRange,

    #[error("Time slot already booked")]
    Conflict { requested_time: DateTime<Utc> },

    #[error("Appointment not found")]
    NotFound { id: i64 },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match &self {
            BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
            BookingError::Storage(err) => {
                tracing::error!(%err, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            BookingError::MissingFields { missing } => {
                json!({ "error": self.to_string(), "missing": missing })
            }
            BookingError::Conflict { requested_time } => {
                json!({ "error": self.to_string(), "requestedTime": requested_time })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conflict_response_carries_requested_time() {
        let requested_time = crate::types::parse_instant("2024-01-08T09:00:30Z").unwrap();
        let response = BookingError::Conflict { requested_time }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = BookingError::NotFound { id: 42 }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_maps_to_500() {
        let response =
            BookingError::Storage(StorageError::Io(std::io::Error::other("disk gone")))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
