use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};
use stockdesk_market_data::{HistoryRange, MarketDataProvider};

use crate::ingestion::ingestion_normalize::quotes_to_price_table;
use crate::ingestion::{IngestionError, IngestionReport, IngestionServiceTrait, SymbolOutcome};
use crate::store::{PriceStoreTrait, PriceTable};
use crate::symbols::Symbol;

/// Fetches full histories from a provider and replaces per-symbol tables.
pub struct IngestionService {
    provider: Arc<dyn MarketDataProvider>,
    store: Arc<dyn PriceStoreTrait>,
    range: HistoryRange,
}

impl IngestionService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, store: Arc<dyn PriceStoreTrait>) -> Self {
        Self {
            provider,
            store,
            range: HistoryRange::Max,
        }
    }

    /// Request a shorter history than the provider's full range.
    pub fn with_range(mut self, range: HistoryRange) -> Self {
        self.range = range;
        self
    }

    async fn fetch_table(&self, symbol: &Symbol) -> Result<PriceTable, IngestionError> {
        let quotes = self
            .provider
            .get_history(symbol.as_str(), self.range)
            .await
            .map_err(|e| IngestionError::Provider(e.to_string()))?;

        let table = quotes_to_price_table(&quotes);
        if table.row_count() == 0 {
            return Err(IngestionError::Provider(format!(
                "{} returned no rows for {}",
                self.provider.id(),
                symbol
            )));
        }
        Ok(table)
    }

    async fn ingest_parsed(&self, symbol: &Symbol) -> Result<usize, IngestionError> {
        let table = self.fetch_table(symbol).await?;
        info!(
            "Fetched {} rows for {}. Storing in database...",
            table.row_count(),
            symbol
        );
        self.store
            .replace_table(symbol, table)
            .await
            .map_err(|e| IngestionError::StoreWrite(e.to_string()))
    }

    async fn store_symbol(&self, symbol: &Symbol) -> Result<usize, IngestionError> {
        info!("Downloading data for {}...", symbol);
        match self.ingest_parsed(symbol).await {
            Ok(rows) => {
                info!("Data for {} stored successfully ({} rows).", symbol, rows);
                Ok(rows)
            }
            Err(e) => {
                error!("Error while processing {}: {}", symbol, e);
                Err(e)
            }
        }
    }
}

fn invalid_symbol(raw_symbol: &str, reason: impl std::fmt::Display) -> IngestionError {
    error!("Error while processing {:?}: {}", raw_symbol, reason);
    IngestionError::InvalidSymbol(raw_symbol.to_string())
}

#[async_trait]
impl IngestionServiceTrait for IngestionService {
    async fn ingest(&self, symbols: &[String]) -> IngestionReport {
        let mut report = IngestionReport::default();

        for raw in symbols {
            let symbol = match Symbol::parse(raw) {
                Ok(symbol) => symbol,
                Err(e) => {
                    let label = raw.trim().to_string();
                    report.push(SymbolOutcome::failed(label, invalid_symbol(raw, e)));
                    continue;
                }
            };

            let outcome = match self.store_symbol(&symbol).await {
                Ok(rows) => SymbolOutcome::stored(symbol, rows),
                Err(e) => SymbolOutcome::failed(symbol, e),
            };
            report.push(outcome);
        }

        info!(
            "Ingestion finished: {} stored, {} failed",
            report.succeeded().count(),
            report.failed().count()
        );
        report
    }

    async fn ingest_symbol(&self, raw_symbol: &str) -> Result<usize, IngestionError> {
        let symbol = Symbol::parse(raw_symbol).map_err(|e| invalid_symbol(raw_symbol, e))?;
        self.store_symbol(&symbol).await
    }
}
