//! Stockdesk Market Data Crate
//!
//! This crate fetches daily price history for ticker symbols from a remote
//! market data provider.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |  Ingestion       | --> |    Provider      | --> |     Quote        |
//! |  (core crate)    |     |  (Yahoo, stubs)  |     |  (daily OHLCV)   |
//! +------------------+     +------------------+     +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataProvider`] - Trait implemented by every history source
//! - [`YahooProvider`] - Yahoo Finance implementation
//! - [`Quote`] - One trading day of OHLCV data
//! - [`HistoryRange`] - How far back a history request reaches
//! - [`MarketDataError`] - Provider-level failures

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{HistoryRange, Quote};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
