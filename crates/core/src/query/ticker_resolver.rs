//! Best-effort guess of which price table a query reads.
//!
//! This matches text, it does not parse SQL. Joins, subqueries and CTEs may
//! resolve to something other than the table the user meant, which is fine
//! for its only uses: picking the chart symbol and the missing-table hint.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FROM_TABLE: Regex = Regex::new(r"(?i)FROM\s+(\w+)").unwrap();
}

/// Uppercased identifier following the first `FROM`, if any.
pub fn resolve_table(sql: &str) -> Option<String> {
    FROM_TABLE
        .captures(sql)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_first_from_uppercased() {
        assert_eq!(resolve_table("select * from aapl limit 5"), Some("AAPL".to_string()));
        assert_eq!(
            resolve_table("SELECT a.Date FROM msft a JOIN aapl b ON a.Date = b.Date"),
            Some("MSFT".to_string())
        );
        assert_eq!(
            resolve_table("SELECT *\nFROM\n\tgoogl"),
            Some("GOOGL".to_string())
        );
    }

    #[test]
    fn test_where_clause_after_table_is_ignored() {
        assert_eq!(
            resolve_table("select * from msft where Close > 100"),
            Some("MSFT".to_string())
        );
    }

    #[test]
    fn test_tolerates_queries_without_from() {
        assert_eq!(resolve_table("SELECT 1"), None);
        assert_eq!(resolve_table(""), None);
        assert_eq!(resolve_table("PRAGMA table_info(AAPL)"), None);
        assert_eq!(resolve_table("not sql at all"), None);
    }

    #[test]
    fn test_matches_inside_subqueries() {
        assert_eq!(
            resolve_table("SELECT * FROM (SELECT * FROM tsla)"),
            Some("TSLA".to_string())
        );
    }
}
