//! SQLite storage implementation for Stockdesk.
//!
//! This crate provides all database-related functionality using rusqlite.
//! It implements the store trait defined in `stockdesk-core` and contains:
//! - Database initialization and connection pooling
//! - The single-writer actor that serializes table replacement
//! - The price table repository
//!
//! # Architecture
//!
//! ```text
//!   core (pipelines)       market-data (provider)
//!         │                        │
//!         └───────────┬────────────┘
//!                     │
//!                     ▼
//!        storage-sqlite (this crate)
//!                     │
//!                     ▼
//!                 SQLite DB
//! ```
//!
//! Price tables are created at runtime, one per symbol, so there is no fixed
//! schema and no migrations.

pub mod db;
pub mod errors;
pub mod prices;
pub mod utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open_read_only, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use prices::PriceRepository;

// Re-export from stockdesk-core for convenience
pub use stockdesk_core::errors::{DatabaseError, Error, Result};
