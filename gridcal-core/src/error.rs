//! Error types for the gridcal ecosystem.

use thiserror::Error;

/// Errors that can occur in gridcal operations.
///
/// Absent records (unknown event id, missing settings row) are not errors;
/// they surface as `Option`/default values so callers must handle them
/// explicitly.
#[derive(Error, Debug)]
pub enum GridCalError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for gridcal operations.
pub type GridCalResult<T> = Result<T, GridCalError>;
