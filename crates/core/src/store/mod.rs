//! Store module - tabular data models and the storage trait.
//!
//! The core crate never talks to SQLite directly. Pipelines depend on
//! [`PriceStoreTrait`], implemented by the `storage-sqlite` crate and by
//! in-memory fakes in tests.

mod store_model;
mod store_traits;

pub use store_model::{CellValue, ColumnKind, ColumnSpec, PriceTable, SqlAccess, Table};
pub use store_traits::PriceStoreTrait;
