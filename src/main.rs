use chrono::Duration;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::booking::BookingService;
use crate::configuration::{Config, StorageKind};
use crate::conflict::ConflictChecker;
use crate::file_storage::FileStorage;
use crate::http::start_server;
use crate::memory_storage::MemoryStorage;
use crate::storage::AppointmentStorage;

mod booking;
mod configuration;
mod conflict;
mod error;
mod file_storage;
mod http;
mod memory_storage;
mod slots;
mod storage;
mod store;
#[cfg(test)]
mod testutils;
mod types;

struct AppState<S: AppointmentStorage> {
    booking: BookingService<S>,
}

impl<S: AppointmentStorage> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            booking: self.booking.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::parse();
    let checker = ConflictChecker::new(Duration::seconds(i64::from(config.tolerance_secs)));

    match config.storage {
        StorageKind::Memory => {
            tracing::info!("using in-memory storage");
            let state = AppState {
                booking: BookingService::new(MemoryStorage::default(), checker),
            };
            start_server(state, config.port).await;
        }
        StorageKind::File => {
            tracing::info!(path = %config.data_file.display(), "using file storage");
            let storage =
                FileStorage::new(&config.data_file).expect("failed to initialize data file");
            let state = AppState {
                booking: BookingService::new(storage, checker),
            };
            start_server(state, config.port).await;
        }
    }
}
