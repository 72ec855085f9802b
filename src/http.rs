use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::error::BookingError;
use crate::storage::AppointmentStorage;
use crate::types::{parse_instant, Appointment, BookingRequest, Slot};
use crate::AppState;

#[derive(Debug, Deserialize)]
struct RangeQuery {
    start: Option<String>,
    end: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlotsQuery {
    reference: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse {
    success: bool,
    id: i64,
    deleted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

pub fn router<S: AppointmentStorage>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route("/api/appointments/upcoming", get(upcoming_appointments))
        .route("/api/appointments/:id", delete(delete_appointment))
        .route("/api/slots", get(week_slots))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(cors)
}

pub async fn start_server<S: AppointmentStorage>(state: AppState<S>, port: u16) {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, router(state)).await.unwrap();
}

async fn list_appointments<S: AppointmentStorage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Appointment>>, BookingError> {
    Ok(Json(state.booking.list()?))
}

async fn create_appointment<S: AppointmentStorage>(
    State(state): State<AppState<S>>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Appointment>), BookingError> {
    let appointment = state.booking.create(&request)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

async fn upcoming_appointments<S: AppointmentStorage>(
    State(state): State<AppState<S>>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<Vec<Appointment>>, BookingError> {
    let mut missing = Vec::new();
    if range.start.is_none() {
        missing.push("start");
    }
    if range.end.is_none() {
        missing.push("end");
    }
    let (Some(start), Some(end)) = (range.start, range.end) else {
        return Err(BookingError::MissingFields { missing });
    };

    Ok(Json(state.booking.list_in_range(&start, &end)?))
}

async fn delete_appointment<S: AppointmentStorage>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, BookingError> {
    let deleted_at = state.booking.delete(id)?;
    Ok(Json(DeleteResponse {
        success: true,
        id,
        deleted_at,
    }))
}

async fn week_slots<S: AppointmentStorage>(
    State(state): State<AppState<S>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<Slot>>, BookingError> {
    let now = Utc::now();
    let reference = match query.reference {
        Some(raw) => parse_instant(&raw)?,
        None => now,
    };
    Ok(Json(state.booking.week_slots(reference, now)?))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
