//! Core error types for triumph-core.
//!
//! This module defines the error hierarchy using thiserror. Every failure a
//! caller can observe from a tracker operation maps to one of these variants.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for triumph-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any state changed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Operation not allowed in the current streak state
    #[error("Invalid state: {0}")]
    InvalidState(#[from] StateError),

    /// Attempt to remove a built-in setback type
    #[error("{0}")]
    ProtectedType(#[from] ProtectedTypeError),

    /// A write to the persistence port failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text was missing or blank after trimming
    #[error("'{field}' must not be empty")]
    Empty { field: &'static str },

    /// Setback type is not present in the registry
    #[error("unknown setback type '{0}'; register it first")]
    UnknownType(String),
}

/// Streak state errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("no streak is running")]
    NotRunning,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("setback type '{0}' is built in and cannot be removed")]
pub struct ProtectedTypeError(pub String);

/// Persistence port errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open the backing store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A write was not acknowledged
    #[error("write of '{key}' failed: {message}")]
    WriteFailed { key: String, message: String },

    /// A read failed at the transport level (not a missing key)
    #[error("read of '{key}' failed: {message}")]
    ReadFailed { key: String, message: String },

    /// Database is locked
    #[error("Store is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(#[source] std::io::Error),

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

/// Classifier failures. These never reach tracker callers; the coach turns
/// them into the fallback message.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("classifier returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("classifier timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("malformed classifier response: {0}")]
    Malformed(String),

    #[error("classifier endpoint not configured")]
    NotConfigured,
}

impl PersistenceError {
    pub fn write(key: &str, err: impl std::fmt::Display) -> Self {
        PersistenceError::WriteFailed {
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    pub fn read(key: &str, err: impl std::fmt::Display) -> Self {
        PersistenceError::ReadFailed {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg)
                if code.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                PersistenceError::Locked
            }
            _ => PersistenceError::WriteFailed {
                key: String::new(),
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
