//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{AggregateError, StoreError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &AggregateError) -> String {
    match e {
        AggregateError::Store(StoreError::MissingWorkDir(path)) => format!(
            "Working directory {} does not exist. Has any project produced a report yet?",
            path.display()
        ),
        _ => e.to_string(),
    }
}
