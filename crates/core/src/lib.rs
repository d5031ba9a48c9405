//! Stockdesk Core - ingestion and query pipelines, session state, and the
//! storage trait.
//!
//! This crate is database-agnostic. The `storage-sqlite` crate implements
//! [`store::PriceStoreTrait`]; the market data provider comes from the
//! `market-data` crate.

pub mod constants;
pub mod errors;
pub mod ingestion;
pub mod query;
pub mod session;
pub mod store;
pub mod symbols;

pub use ingestion::{IngestionReport, IngestionService, IngestionServiceTrait};
pub use query::{QueryError, QueryResult, QueryService, QueryServiceTrait};
pub use session::AppSession;
pub use symbols::Symbol;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
