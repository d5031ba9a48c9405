/// Default location of the price store
pub const DEFAULT_DB_PATH: &str = "stocks.db";

/// Tickers offered before the user enters any
pub const DEFAULT_TICKERS: [&str; 3] = ["AAPL", "MSFT", "GOOGL"];

/// Row limit used by the suggested query
pub const DEFAULT_QUERY_LIMIT: usize = 10;

/// Name of the trading-day column in every price table
pub const DATE_COLUMN: &str = "Date";

/// Persisted and displayed date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";
