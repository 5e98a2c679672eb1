//! Error types for pomodoro-pro-core.
//!
//! Only configuration errors are fatal. Storage errors are surfaced by the
//! storage layer but the engine recovers from them locally.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::Mode;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A mode was configured with a zero-length interval
    #[error("Invalid duration for {mode}: {secs} seconds (must be greater than zero)")]
    InvalidDuration { mode: Mode, secs: u64 },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite query or connection failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Backend could not be reached at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Record could not be encoded
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

