//! Core error types for kanadojo-core.
//!
//! This module defines the error hierarchy using thiserror. Scheduler
//! construction, configuration files and simulation input each get their
//! own enum, and [`CoreError`] wraps them for callers that don't care.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kanadojo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Scheduler construction errors
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised while building a [`crate::ModeScheduler`].
///
/// Only construction can fail; every per-answer operation is total.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    /// A parameter is out of range or inconsistent with another one
    #[error("Invalid scheduler config for '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },
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

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<SchedulerError> for ConfigError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::InvalidConfig { field, message } => ConfigError::InvalidValue {
                key: format!("reverse_mode.{field}"),
                message,
            },
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
