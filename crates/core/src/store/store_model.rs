use serde::{Deserialize, Serialize};

/// A single value read from or written to the store.
///
/// Mirrors SQLite's storage classes. Serialized untagged, so a row turns
/// into a plain JSON array such as `["2024-01-02", 185.6, null]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Real)
    }
}

impl From<Option<i64>> for CellValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Integer)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// Declared type of a price table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Real,
    Integer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Normalized history of one symbol, ready to be written as a table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceTable {
    pub columns: Vec<ColumnSpec>,
    /// Each row has exactly one cell per column, in column order.
    pub rows: Vec<Vec<CellValue>>,
}

impl PriceTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Raw result of a statement, with column labels exactly as the engine
/// reported them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// How much the query pipeline may do to the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SqlAccess {
    /// Any statement the engine accepts, DDL and DML included.
    #[default]
    ReadWrite,
    /// Statements run on a read-only connection; writes fail in the engine.
    ReadOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_values_serialize_untagged() {
        let row = vec![
            CellValue::Text("2024-01-02".to_string()),
            CellValue::Real(185.5),
            CellValue::Integer(1000),
            CellValue::Null,
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["2024-01-02",185.5,1000,null]"#);
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(CellValue::from(Some(1.5)), CellValue::Real(1.5));
        assert_eq!(CellValue::from(None::<f64>), CellValue::Null);
        assert_eq!(CellValue::from(Some(7_i64)), CellValue::Integer(7));
        assert!(CellValue::from(None::<i64>).is_null());
    }

    #[test]
    fn test_default_access_is_read_write() {
        assert_eq!(SqlAccess::default(), SqlAccess::ReadWrite);
    }
}
