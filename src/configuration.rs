use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "appointment_manager", about = "Appointment booking backend")]
pub struct Config {
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Where the appointment collection lives.
    #[arg(long, value_enum, env = "STORAGE", default_value_t = StorageKind::Memory)]
    pub storage: StorageKind,

    /// Backing file for `--storage file`.
    #[arg(long, env = "DATA_FILE", default_value = "data.json")]
    pub data_file: PathBuf,

    /// Minimum separation between two appointments, in seconds.
    #[arg(long, env = "CONFLICT_TOLERANCE_SECS", default_value_t = 60)]
    pub tolerance_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    Memory,
    File,
}
