//! Ingestion module - fetch a symbol's full history and replace its table.
//!
//! ```text
//! ticker list ─▶ Symbol::parse ─▶ MarketDataProvider ─▶ normalize ─▶ PriceStoreTrait
//!                    │                    │                               │
//!                    └──── per-symbol IngestionError, batch continues ◀───┘
//! ```

mod ingestion_model;
mod ingestion_normalize;
mod ingestion_service;
mod ingestion_traits;

pub use ingestion_model::{IngestionError, IngestionReport, OutcomeStatus, SymbolOutcome};
pub use ingestion_normalize::{quotes_to_price_table, sanitize_column_name, PROVIDER_COLUMNS};
pub use ingestion_service::IngestionService;
pub use ingestion_traits::IngestionServiceTrait;
