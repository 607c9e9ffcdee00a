//! Error types for the calculator boundary
//!
//! The math modules never fail; these errors only arise while turning
//! user-supplied text into numbers or while loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected calculator input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A scalar field did not parse as a finite number
    #[error("{field}: '{value}' is not a number")]
    NotANumber { field: String, value: String },

    /// A required field was absent or blank
    #[error("missing required input '{field}'")]
    MissingField { field: String },

    /// A number was outside the range the calculator accepts
    #[error("{field}: {value} is out of range ({reason})")]
    OutOfRange {
        field: String,
        value: f64,
        reason: String,
    },
}

/// Failure while loading an [`EngineConfig`](crate::config::EngineConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("environment variable {name}: {source}")]
    Env {
        name: String,
        #[source]
        source: InputError,
    },
}
