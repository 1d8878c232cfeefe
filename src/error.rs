//! Error types for the graft aggregation engine.

use std::path::PathBuf;
use thiserror::Error;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed document {name}: {source}")]
    Format {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid document name: {0}")]
    InvalidName(String),

    #[error("Working directory not found: {0}")]
    MissingWorkDir(PathBuf),
}

impl StoreError {
    /// Wrap an I/O failure with the path it happened on.
    pub(crate) fn io_at(action: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        StoreError::IoError(std::io::Error::new(
            err.kind(),
            format!("Failed to {} {:?}: {}", action, path, err),
        ))
    }
}

/// Errors surfaced by an aggregation pass and the surrounding tooling
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Project set is empty; nothing to aggregate")]
    EmptyProjectSet,

    #[error("Duplicate project coordinate: {0}")]
    DuplicateProject(String),

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Invalid project manifest {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to render output: {0}")]
    Render(String),

    #[error("Root document not found in {0}. Run `graft aggregate` after the top-level project has reported.")]
    RootMissing(PathBuf),
}

impl From<config::ConfigError> for AggregateError {
    fn from(err: config::ConfigError) -> Self {
        AggregateError::ConfigError(err.to_string())
    }
}
