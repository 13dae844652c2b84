//! Error types for the synthcheck harness
//!
//! Harness-level errors only. Per-scenario outcomes (timeout, undersized
//! output, ...) are data, not errors; see `scenario::FailureKind`. The two
//! variants the scenario runner folds into classifications are `LaunchFailed`
//! and `Timeout`.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Target Errors ===
    #[error("Target executable '{name}' not found. Searched: {searched}")]
    TargetNotFound { name: String, searched: String },

    #[error("Failed to launch target: {0}")]
    LaunchFailed(String),

    #[error("Render timed out after {0} seconds")]
    Timeout(u64),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to parse scenario suite '{path}': {error}")]
    SuiteParse { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a target not found error with search locations
    pub fn target_not_found<S: AsRef<str>>(name: &str, searched: &[S]) -> Self {
        Self::TargetNotFound {
            name: name.to_string(),
            searched: searched
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create a suite parse error
    pub fn suite_parse(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::SuiteParse {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
