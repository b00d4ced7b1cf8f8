mod config;
pub mod database;

pub use config::{Config, TimerConfig};
pub use database::{Database, LogEntry, LogStats};

use std::path::PathBuf;

/// Returns `~/.config/discipline[-dev]/` based on DISCIPLINE_ENV.
///
/// Set DISCIPLINE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DISCIPLINE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("discipline-dev")
    } else {
        base_dir.join("discipline")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
