use async_trait::async_trait;

use crate::ingestion::{IngestionError, IngestionReport};

/// Trait for ingestion service operations
#[async_trait]
pub trait IngestionServiceTrait: Send + Sync {
    /// Ingest every symbol in order. Never fails as a whole; per-symbol
    /// failures are reported in the returned [`IngestionReport`].
    async fn ingest(&self, symbols: &[String]) -> IngestionReport;

    /// Ingest one symbol, returning the number of rows written.
    async fn ingest_symbol(&self, raw_symbol: &str) -> Result<usize, IngestionError>;
}
