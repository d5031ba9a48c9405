use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why one symbol of a batch was not stored.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum IngestionError {
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// The provider failed or returned no usable rows.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The table replacement failed; any previous table is left intact.
    #[error("Store write failed: {0}")]
    StoreWrite(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OutcomeStatus {
    Stored { rows: usize },
    Failed { error: IngestionError },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolOutcome {
    /// Uppercased symbol, or the raw input when it could not be parsed.
    pub symbol: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl SymbolOutcome {
    pub fn stored(symbol: impl Into<String>, rows: usize) -> Self {
        Self {
            symbol: symbol.into(),
            status: OutcomeStatus::Stored { rows },
        }
    }

    pub fn failed(symbol: impl Into<String>, error: IngestionError) -> Self {
        Self {
            symbol: symbol.into(),
            status: OutcomeStatus::Failed { error },
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self.status, OutcomeStatus::Stored { .. })
    }
}

/// Per-symbol results of one ingestion batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionReport {
    pub outcomes: Vec<SymbolOutcome>,
}

impl IngestionReport {
    pub fn push(&mut self, outcome: SymbolOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &SymbolOutcome> {
        self.outcomes.iter().filter(|o| o.is_stored())
    }

    pub fn failed(&self) -> impl Iterator<Item = &SymbolOutcome> {
        self.outcomes.iter().filter(|o| !o.is_stored())
    }

    pub fn stored_symbols(&self) -> Vec<String> {
        self.succeeded().map(|o| o.symbol.clone()).collect()
    }

    /// True when every submitted symbol was stored. An empty batch counts.
    pub fn is_complete_success(&self) -> bool {
        self.failed().next().is_none()
    }
}
