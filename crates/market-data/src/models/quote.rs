use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day of market data
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Timestamp of the bar as reported by the provider
    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    /// Closing price (required)
    pub close: Decimal,

    /// Close adjusted for splits and dividends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adj_close: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    /// Quote currency
    pub currency: String,

    /// Source of the quote (YAHOO, FIXTURE, etc.)
    pub source: String,

    /// Exchange offset from UTC in seconds, as reported by the provider
    #[serde(default)]
    pub utc_offset_secs: i32,
}

impl Quote {
    /// Create a new quote with minimal required fields
    pub fn new(timestamp: DateTime<Utc>, close: Decimal, currency: String, source: String) -> Self {
        Self {
            timestamp,
            open: None,
            high: None,
            low: None,
            close,
            adj_close: None,
            volume: None,
            currency,
            source,
            utc_offset_secs: 0,
        }
    }

    /// Create a full OHLCV quote
    #[allow(clippy::too_many_arguments)]
    pub fn ohlcv(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
        currency: String,
        source: String,
    ) -> Self {
        Self {
            timestamp,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close,
            adj_close: None,
            volume: Some(volume),
            currency,
            source,
            utc_offset_secs: 0,
        }
    }

    pub fn with_adj_close(mut self, adj_close: Decimal) -> Self {
        self.adj_close = Some(adj_close);
        self
    }

    pub fn with_utc_offset(mut self, utc_offset_secs: i32) -> Self {
        self.utc_offset_secs = utc_offset_secs;
        self
    }

    /// Calendar day of the bar in the exchange's local time.
    ///
    /// An out-of-range offset falls back to the UTC day.
    pub fn trading_day(&self) -> NaiveDate {
        FixedOffset::east_opt(self.utc_offset_secs)
            .map(|tz| self.timestamp.with_timezone(&tz).date_naive())
            .unwrap_or_else(|| self.timestamp.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = Quote::new(
            Utc::now(),
            dec!(150.25),
            "USD".to_string(),
            "YAHOO".to_string(),
        );
        assert_eq!(quote.close, dec!(150.25));
        assert_eq!(quote.currency, "USD");
        assert!(quote.open.is_none());
        assert!(quote.adj_close.is_none());
    }

    #[test]
    fn test_quote_ohlcv_with_adj_close() {
        let quote = Quote::ohlcv(
            Utc::now(),
            dec!(148.00),
            dec!(152.00),
            dec!(147.50),
            dec!(150.25),
            dec!(1000000),
            "USD".to_string(),
            "YAHOO".to_string(),
        )
        .with_adj_close(dec!(149.90));
        assert_eq!(quote.open, Some(dec!(148.00)));
        assert_eq!(quote.high, Some(dec!(152.00)));
        assert_eq!(quote.low, Some(dec!(147.50)));
        assert_eq!(quote.adj_close, Some(dec!(149.90)));
        assert_eq!(quote.volume, Some(dec!(1000000)));
    }

    #[test]
    fn test_trading_day_uses_exchange_offset() {
        // 10:00 AEDT session open on 2024-01-03 is still 2024-01-02 in UTC
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 23, 0, 0).unwrap();
        let quote = Quote::new(timestamp, dec!(7.5), "AUD".to_string(), "YAHOO".to_string())
            .with_utc_offset(11 * 3600);
        assert_eq!(
            quote.trading_day(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_invalid_offset_falls_back_to_utc_day() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 23, 0, 0).unwrap();
        let quote = Quote::new(timestamp, dec!(1), "USD".to_string(), "YAHOO".to_string())
            .with_utc_offset(i32::MAX);
        assert_eq!(
            quote.trading_day(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_trading_day_without_offset_is_utc_day() {
        // US market open, 09:30 New York
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 8, 14, 30, 0).unwrap();
        let quote = Quote::new(timestamp, dec!(1), "USD".to_string(), "YAHOO".to_string());
        assert_eq!(
            quote.trading_day(),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
    }

    #[test]
    fn test_optional_fields_skipped_when_serialized() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 8, 14, 30, 0).unwrap();
        let quote = Quote::new(timestamp, dec!(10), "USD".to_string(), "YAHOO".to_string());
        let json = serde_json::to_value(&quote).unwrap();
        assert!(json.get("open").is_none());
        assert!(json.get("adj_close").is_none());
        assert_eq!(json["source"], "YAHOO");
    }
}
