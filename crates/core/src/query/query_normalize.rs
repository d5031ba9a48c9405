use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::constants::{DATE_COLUMN, DATE_FORMAT};
use crate::store::CellValue;

lazy_static! {
    // ('Close', 'AAPL') as produced by multi-index column labels
    static ref TUPLE_LABEL: Regex = Regex::new(r#"^\(\s*['"]([^'"]*)['"]\s*(,.*)?\)$"#).unwrap();
    static ref QUALIFIED_LABEL: Regex = Regex::new(r"^\w+\.(\w+)$").unwrap();
}

const DATE_ONLY_FORMATS: [&str; 3] = [DATE_FORMAT, "%Y/%m/%d", "%Y%m%d"];

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

fn strip_enclosing(label: &str) -> &str {
    let pairs = [('"', '"'), ('\'', '\''), ('`', '`'), ('[', ']')];
    for (open, close) in pairs {
        if label.len() >= 2 && label.starts_with(open) && label.ends_with(close) {
            return &label[1..label.len() - 1];
        }
    }
    label
}

/// Reduce an engine column label to a bare column name.
///
/// Handles tuple labels, quoting and table qualification. Expression labels
/// such as `ROUND(a.Close, 2)` are returned trimmed but otherwise untouched.
pub fn normalize_column_name(label: &str) -> String {
    let mut name = label.trim();

    if let Some(caps) = TUPLE_LABEL.captures(name) {
        if let Some(first) = caps.get(1) {
            name = first.as_str().trim();
        }
    }

    name = strip_enclosing(name).trim();

    if let Some(caps) = QUALIFIED_LABEL.captures(name) {
        if let Some(column) = caps.get(1) {
            name = column.as_str();
        }
    }

    name.to_string()
}

/// Parse a calendar date from the text forms a stored `Date` column may hold.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    DATE_ONLY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Rewrite every parseable value of the `Date` column (if any) as
/// `YYYY-MM-DD`. Other values are left as they are.
pub fn reformat_date_column(columns: &[String], rows: &mut [Vec<CellValue>]) {
    let Some(idx) = columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case(DATE_COLUMN))
    else {
        return;
    };

    for row in rows.iter_mut() {
        let Some(cell) = row.get_mut(idx) else {
            continue;
        };
        let CellValue::Text(text) = cell else {
            continue;
        };
        match parse_calendar_date(text) {
            Some(date) => *text = date.format(DATE_FORMAT).to_string(),
            None => debug!("Leaving unparseable date value {:?} as is", text),
        }
    }
}
