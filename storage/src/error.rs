//! Storage error types.
//!
//! Absence is never an error here: lookups return `Option`, duplicate inserts are no-ops.
//! Anything left is a driver or connectivity failure.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}
