use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_QUERY_LIMIT, DEFAULT_TICKERS};
use crate::ingestion::IngestionReport;
use crate::query::{resolve_table, QueryOutcome};

/// Everything the dashboard remembers between interactions.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSession {
    pub tickers: Vec<String>,
    /// Symbol whose chart is shown, resolved from the last query.
    pub current_symbol: Option<String>,
    pub last_result: Option<QueryOutcome>,
    /// Bumped on every recorded query; drives chart recomputation.
    pub result_version: u64,
}

impl Default for AppSession {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
            current_symbol: None,
            last_result: None,
            result_version: 0,
        }
    }
}

impl AppSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query suggested for the first ticker.
    pub fn default_query(&self) -> String {
        let table = self
            .tickers
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_TICKERS[0]);
        format!("SELECT * FROM {} LIMIT {}", table, DEFAULT_QUERY_LIMIT)
    }

    /// Track the symbol a query reads. A query with no `FROM` keeps the
    /// previous selection.
    pub fn observe_query(&mut self, sql: &str) -> Option<&str> {
        if let Some(symbol) = resolve_table(sql) {
            self.current_symbol = Some(symbol);
        }
        self.current_symbol.as_deref()
    }

    /// Adopt the submitted tickers once at least one of them was stored.
    pub fn record_ingestion(&mut self, submitted: &[String], report: &IngestionReport) {
        if report.succeeded().next().is_some() {
            self.tickers = submitted.iter().map(|t| t.trim().to_uppercase()).collect();
        }
    }

    pub fn record_query(&mut self, outcome: QueryOutcome) {
        self.last_result = Some(outcome);
        self.result_version += 1;
    }

    /// Identity of the current chart input, if a chart should be drawn.
    pub fn chart_key(&self) -> Option<u64> {
        match &self.last_result {
            Some(Ok(result)) if !result.is_empty() => Some(self.result_version),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tickers: self.tickers.clone(),
            current_symbol: self.current_symbol.clone(),
            default_query: self.default_query(),
            chart_key: self.chart_key(),
            result_version: self.result_version,
        }
    }
}

/// Serializable view of a session for the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub tickers: Vec<String>,
    pub current_symbol: Option<String>,
    pub default_query: String,
    pub chart_key: Option<u64>,
    pub result_version: u64,
}
