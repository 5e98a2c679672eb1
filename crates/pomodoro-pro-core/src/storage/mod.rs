//! Durable key-value storage and configuration.
//!
//! The stats record is a single serialized string under one key, so any
//! backend that can get and set strings will do.

mod config;
pub mod database;
mod memory;

pub use config::{Config, NotificationsConfig, StorageConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Minimal string store the stats record is persisted into.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `POMODORO_PRO_HOME` overrides the location outright. Otherwise this is
/// `~/.config/pomodoro-pro[-dev]/`, with POMODORO_PRO_ENV=dev selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("POMODORO_PRO_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("POMODORO_PRO_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("pomodoro-pro-dev")
            } else {
                base_dir.join("pomodoro-pro")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
