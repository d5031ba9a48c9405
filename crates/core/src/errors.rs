//! Core error types for the Stockdesk application.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from rusqlite, r2d2, etc.) are converted to these types by the storage layer.

use thiserror::Error;

use stockdesk_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// Every variant carries the engine's message as a string so callers can
/// show it to the user verbatim.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The database file or its directory could not be created or opened.
    #[error("Store unavailable at {path}: {reason}")]
    StoreUnavailable { path: String, reason: String },

    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A table write (drop, create or insert) failed.
    #[error("Database write failed: {0}")]
    WriteFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid symbol '{0}'")]
    InvalidSymbol(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
