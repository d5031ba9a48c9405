use std::collections::BTreeMap;

use chrono::NaiveDate;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use stockdesk_market_data::Quote;

use crate::constants::DATE_FORMAT;
use crate::store::{CellValue, ColumnKind, ColumnSpec, PriceTable};

/// Column labels as the provider names them, in table order.
pub const PROVIDER_COLUMNS: [(&str, ColumnKind); 7] = [
    ("Date", ColumnKind::Text),
    ("Open", ColumnKind::Real),
    ("High", ColumnKind::Real),
    ("Low", ColumnKind::Real),
    ("Close", ColumnKind::Real),
    ("Adj Close", ColumnKind::Real),
    ("Volume", ColumnKind::Integer),
];

/// Make a provider label usable as an unquoted SQL identifier
/// (`Adj Close` -> `Adj_Close`).
pub fn sanitize_column_name(label: &str) -> String {
    label.trim().replace(' ', "_")
}

fn price_cell(value: Option<Decimal>) -> CellValue {
    value.and_then(|d| d.to_f64()).into()
}

fn volume_cell(value: Option<Decimal>) -> CellValue {
    value.and_then(|d| d.trunc().to_i64()).into()
}

/// Turn provider quotes into a table with an explicit `Date` column.
///
/// Rows come out sorted by trading day. When the provider reports the same
/// day twice (Yahoo does for the live session), the later quote wins.
pub fn quotes_to_price_table(quotes: &[Quote]) -> PriceTable {
    let columns = PROVIDER_COLUMNS
        .iter()
        .map(|(label, kind)| ColumnSpec::new(sanitize_column_name(label), *kind))
        .collect();

    let mut by_day: BTreeMap<NaiveDate, &Quote> = BTreeMap::new();
    for quote in quotes {
        by_day.insert(quote.trading_day(), quote);
    }

    let rows = by_day
        .into_iter()
        .map(|(day, quote)| {
            vec![
                CellValue::Text(day.format(DATE_FORMAT).to_string()),
                price_cell(quote.open),
                price_cell(quote.high),
                price_cell(quote.low),
                price_cell(Some(quote.close)),
                price_cell(quote.adj_close),
                volume_cell(quote.volume),
            ]
        })
        .collect();

    PriceTable { columns, rows }
}
