//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap rusqlite and r2d2 errors and
//! convert them to the database-agnostic error types defined in
//! `stockdesk_core`.

use stockdesk_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors that wrap rusqlite and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `stockdesk_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// A statement run by the writer actor failed; its transaction is rolled back.
    #[error("Write failed: {0}")]
    WriteFailed(rusqlite::Error),

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::WriteFailed(e) => {
                Error::Database(DatabaseError::WriteFailed(e.to_string()))
            }
            StorageError::Io(e) => Error::Database(DatabaseError::Internal(e.to_string())),
        }
    }
}

/// Convert an error raised inside a writer job.
pub fn map_write_err(err: rusqlite::Error) -> Error {
    StorageError::WriteFailed(err).into()
}

/// Extension trait for easily converting rusqlite and r2d2 Results to core
/// Results.
///
/// This provides a `.into_core()` method which handles the conversion
/// through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> stockdesk_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, rusqlite::Error> {
    fn into_core(self) -> stockdesk_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> stockdesk_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_message_survives_conversion() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn
            .prepare("SELECT * FROM nonexistent_table")
            .map(|_| ())
            .into_core()
            .unwrap_err();
        match err {
            Error::Database(DatabaseError::QueryFailed(msg)) => {
                assert!(msg.contains("no such table: nonexistent_table"), "{msg}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_write_errors_map_to_write_failed() {
        let err = map_write_err(rusqlite::Error::InvalidQuery);
        assert!(matches!(err, Error::Database(DatabaseError::WriteFailed(_))));
    }
}
