//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{HistoryRange, Quote};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new history source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stockdesk_market_data::{HistoryRange, MarketDataError, MarketDataProvider, Quote};
///
/// struct CsvProvider {
///     dir: std::path::PathBuf,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for CsvProvider {
///     fn id(&self) -> &'static str {
///         "CSV"
///     }
///
///     async fn get_history(
///         &self,
///         symbol: &str,
///         range: HistoryRange,
///     ) -> Result<Vec<Quote>, MarketDataError> {
///         // ... read and parse the file for `symbol`
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// stamped onto every quote as its source.
    fn id(&self) -> &'static str;

    /// Fetch the daily history of a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The provider lookup key (e.g., "AAPL", "BRK-B")
    /// * `range` - How far back to reach; [`HistoryRange::Max`] for everything
    ///
    /// # Returns
    ///
    /// Quotes ordered by timestamp ascending. An empty history is reported
    /// as [`MarketDataError::NoDataForRange`], never as an empty vector.
    async fn get_history(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<Vec<Quote>, MarketDataError>;
}
