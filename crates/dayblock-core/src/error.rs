//! Core error types for dayblock-core.
//!
//! One error enum per concern, all derived with thiserror and folded into
//! [`CoreError`] for callers that do not care which layer failed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayblock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Clock string parsing errors
    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    /// Task store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Planner input errors
    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Clock string errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Input is not a `HH:MM` clock time within 00:00..=23:59
    #[error("Malformed clock time '{input}': expected HH:MM")]
    Malformed { input: String },
}

/// Task store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No task with this id on the addressed date
    #[error("Task not found: {id}")]
    NotFound { id: String },

    /// Reorder index outside the scheduled subset
    #[error("Index {index} out of bounds for scheduled tasks (length: {len})")]
    InvalidIndex { index: usize, len: usize },

    /// Durations are minutes and cannot be negative
    #[error("Invalid duration {duration}: must be zero or more minutes")]
    InvalidDuration { duration: i32 },
}

impl StoreError {
    /// Returns whether the error only means the addressed task is gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Errors raised by planner inputs coming from the shell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Selected date is not an ISO `YYYY-MM-DD` date
    #[error("Malformed date '{input}': expected YYYY-MM-DD")]
    MalformedDate { input: String },

    /// Date navigation left the supported calendar range
    #[error("Date out of range: {days} days from {from}")]
    DateOutOfRange { from: chrono::NaiveDate, days: i64 },
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not address a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home directory could not be resolved
    #[error("Cannot determine configuration directory")]
    NoConfigDir,
}
