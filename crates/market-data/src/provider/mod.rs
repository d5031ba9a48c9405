//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - The Yahoo Finance implementation
//!
//! Providers receive a plain ticker string. Normalizing user input into a
//! canonical symbol is the caller's job, not the provider's.

mod traits;

pub mod yahoo;

pub use traits::MarketDataProvider;
