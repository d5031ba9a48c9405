//! Yahoo Finance market data provider.
//!
//! Fetches daily bars from the Yahoo chart API for equities, ETFs, indices
//! (`^GSPC`), cryptocurrencies (`BTC-USD`) and FX pairs (`EURUSD=X`).

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{HistoryRange, Quote};
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Bar interval requested from the chart API.
const DAILY_INTERVAL: &str = "1d";

/// The chart endpoint does not carry a reliable currency per bar.
const DEFAULT_CURRENCY: &str = "USD";

/// Raw numeric fields of one Yahoo bar, before validation.
#[derive(Debug, Clone, Copy)]
struct RawBar {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adjclose: f64,
    volume: u64,
}

impl From<&yahoo::Quote> for RawBar {
    fn from(q: &yahoo::Quote) -> Self {
        RawBar {
            timestamp: q.timestamp as i64,
            open: q.open,
            high: q.high,
            low: q.low,
            close: q.close,
            adjclose: q.adjclose,
            volume: q.volume,
        }
    }
}

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    /// Convert a raw Yahoo bar to our Quote model.
    ///
    /// Yahoo pads gaps with NaN; open/high/low/adjclose degrade to `None`,
    /// but a bar without a finite close is rejected. `utc_offset_secs` is the
    /// exchange offset from the chart metadata.
    fn bar_to_quote(bar: RawBar, utc_offset_secs: i32) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(bar.timestamp, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", bar.timestamp),
            })?;

        let close = Decimal::from_f64_retain(bar.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!("Failed to convert close price {} to Decimal", bar.close),
            }
        })?;

        Ok(Quote {
            timestamp,
            open: Decimal::from_f64_retain(bar.open),
            high: Decimal::from_f64_retain(bar.high),
            low: Decimal::from_f64_retain(bar.low),
            close,
            adj_close: Decimal::from_f64_retain(bar.adjclose),
            volume: Decimal::from_u64(bar.volume),
            currency: DEFAULT_CURRENCY.to_string(),
            source: PROVIDER_ID.to_string(),
            utc_offset_secs,
        })
    }

    fn map_yahoo_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
        if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }
        }
    }

    /// Convert bars, dropping the ones that fail validation, and sort them.
    fn collect_quotes(
        symbol: &str,
        bars: Vec<RawBar>,
        utc_offset_secs: i32,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let mut quotes: Vec<Quote> = bars
            .into_iter()
            .filter_map(|bar| match Self::bar_to_quote(bar, utc_offset_secs) {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("Skipping {} bar due to conversion error: {}", symbol, e);
                    None
                }
            })
            .collect();

        if quotes.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }

        quotes.sort_by_key(|q| q.timestamp);
        Ok(quotes)
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_history(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!("Fetching {} history for {} from Yahoo", range, symbol);

        let response = self
            .connector
            .get_quote_range(symbol, DAILY_INTERVAL, range.as_str())
            .await
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let utc_offset_secs = match response.metadata() {
            Ok(meta) => meta.gmtoffset,
            Err(e) => {
                warn!("No exchange metadata for '{}', using UTC days: {}", symbol, e);
                0
            }
        };

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let bars = yahoo_quotes.iter().map(RawBar::from).collect();
                Self::collect_quotes(symbol, bars, utc_offset_secs)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!("No historical quotes returned for '{}' ({})", symbol, range);
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(Self::map_yahoo_error(symbol, e)),
        }
    }
}
