use serde::{Deserialize, Serialize};

/// How far back a history request reaches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryRange {
    /// Everything the provider has
    #[default]
    Max,
    TenYears,
    FiveYears,
    OneYear,
    SixMonths,
    OneMonth,
}

impl HistoryRange {
    /// Range string understood by the Yahoo chart API.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::Max => "max",
            HistoryRange::TenYears => "10y",
            HistoryRange::FiveYears => "5y",
            HistoryRange::OneYear => "1y",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneMonth => "1mo",
        }
    }
}

impl std::fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
