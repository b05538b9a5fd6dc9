//! Core error types for hangout-core.
//!
//! The recommendation engine itself never fails; these errors belong to the
//! storage, backup, and configuration layers that feed it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hangout-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backup export/import errors
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the JSON-file repositories.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),

    /// Failed to write a data file
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No record with the given id
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Backup and restore errors.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The snapshot is missing one of its required sections
    #[error("Invalid backup file format: missing '{0}'")]
    InvalidFormat(&'static str),

    /// The snapshot could not be read from disk
    #[error("Failed to read backup {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Import failed part way and the previous data was restored
    #[error("Import failed and was rolled back: {0}")]
    RolledBack(String),
}

/// Validation errors for data entering the repositories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// Closeness outside 1..=10
    #[error("Invalid closeness {0}: must be between 1 and 10")]
    InvalidCloseness(u8),

    /// Weekly hangout target outside 1..=10
    #[error("Invalid weekly hangout target {0}: must be between 1 and 10")]
    InvalidWeeklyTarget(u32),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
