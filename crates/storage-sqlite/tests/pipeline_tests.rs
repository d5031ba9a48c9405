//! End-to-end ingestion and query tests against a throwaway SQLite file.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use stockdesk_core::ingestion::{
    IngestionError, IngestionService, IngestionServiceTrait, OutcomeStatus,
};
use stockdesk_core::query::{resolve_table, QueryError, QueryService, QueryServiceTrait};
use stockdesk_core::store::{CellValue, PriceStoreTrait, SqlAccess};
use stockdesk_core::symbols::Symbol;
use stockdesk_market_data::{HistoryRange, MarketDataError, MarketDataProvider, Quote};
use stockdesk_storage_sqlite::{create_pool, init, spawn_writer, PriceRepository};

const FIXTURE_DAYS: i64 = 5;

/// Serves five trading days for AAPL, MSFT and BRK-B; everything else is unknown.
struct FixtureProvider;

#[async_trait]
impl MarketDataProvider for FixtureProvider {
    fn id(&self) -> &'static str {
        "FIXTURE"
    }

    async fn get_history(
        &self,
        symbol: &str,
        _range: HistoryRange,
    ) -> Result<Vec<Quote>, MarketDataError> {
        if !matches!(symbol, "AAPL" | "MSFT" | "BRK-B") {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
        Ok((0..FIXTURE_DAYS)
            .map(|i| {
                let close = dec!(185.5) + Decimal::from(i);
                Quote::ohlcv(
                    start + Duration::days(i),
                    close - dec!(1),
                    close + dec!(1),
                    close - dec!(2),
                    close,
                    dec!(1000000),
                    "USD".to_string(),
                    "FIXTURE".to_string(),
                )
                .with_adj_close(close)
            })
            .collect())
    }
}

struct Harness {
    _dir: TempDir,
    store: Arc<PriceRepository>,
    ingestion: IngestionService,
    query: QueryService,
}

fn harness(access: SqlAccess) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let db_path = init(dir.path().join("stocks.db").to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    let writer = spawn_writer((*pool).clone());
    let store = Arc::new(PriceRepository::new(pool, writer, db_path));

    Harness {
        _dir: dir,
        ingestion: IngestionService::new(Arc::new(FixtureProvider), store.clone()),
        query: QueryService::new(store.clone()).with_access(access),
        store,
    }
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn count_rows(h: &Harness, table: &str) -> i64 {
    let result = h
        .query
        .execute(&format!("SELECT COUNT(*) AS n FROM {table}"))
        .unwrap();
    match result.rows[0][0] {
        CellValue::Integer(n) => n,
        ref other => panic!("unexpected count cell: {other:?}"),
    }
}

#[tokio::test]
async fn ingesting_twice_replaces_the_table() {
    let h = harness(SqlAccess::ReadWrite);

    h.ingestion.ingest(&symbols(&["AAPL"])).await;
    h.ingestion.ingest(&symbols(&["AAPL"])).await;

    assert_eq!(count_rows(&h, "AAPL"), FIXTURE_DAYS);
}

#[tokio::test]
async fn lowercase_symbols_land_in_uppercase_tables() {
    let h = harness(SqlAccess::ReadWrite);

    let report = h.ingestion.ingest(&symbols(&["aapl"])).await;

    assert!(report.is_complete_success());
    assert_eq!(h.store.list_tables().unwrap(), vec!["AAPL"]);
    assert_eq!(resolve_table("select * from aapl").as_deref(), Some("AAPL"));
    assert!(h
        .query
        .table_exists(&Symbol::parse("aapl").unwrap())
        .unwrap());
}

#[tokio::test]
async fn one_bad_symbol_does_not_abort_the_batch() {
    let h = harness(SqlAccess::ReadWrite);

    let report = h.ingestion.ingest(&symbols(&["AAPL", "BADSYM"])).await;

    assert_eq!(report.stored_symbols(), vec!["AAPL"]);
    assert!(matches!(
        &report.outcomes[1].status,
        OutcomeStatus::Failed {
            error: IngestionError::Provider(_)
        }
    ));
    assert!(h.query.table_exists(&Symbol::parse("AAPL").unwrap()).unwrap());
    assert!(!h.query.table_exists(&Symbol::parse("BADSYM").unwrap()).unwrap());
}

#[tokio::test]
async fn stored_table_has_sanitized_columns_and_iso_dates() {
    let h = harness(SqlAccess::ReadWrite);
    h.ingestion.ingest(&symbols(&["MSFT"])).await;

    let result = h.query.execute("SELECT * FROM MSFT ORDER BY Date").unwrap();

    assert_eq!(
        result.columns,
        vec!["Date", "Open", "High", "Low", "Close", "Adj_Close", "Volume"]
    );
    assert_eq!(result.row_count(), FIXTURE_DAYS as usize);
    assert_eq!(result.rows[0][0], CellValue::Text("2024-01-02".to_string()));
    assert_eq!(result.rows[0][4], CellValue::Real(185.5));
    assert_eq!(result.rows[0][6], CellValue::Integer(1_000_000));
}

#[tokio::test]
async fn aliased_query_columns_are_bare_names() {
    let h = harness(SqlAccess::ReadWrite);
    h.ingestion.ingest(&symbols(&["AAPL"])).await;

    let result = h
        .query
        .execute("SELECT a.Date, a.Close FROM AAPL a LIMIT 1")
        .unwrap();

    assert_eq!(result.columns, vec!["Date", "Close"]);
    let date = result.rows[0][0].as_text().unwrap();
    assert_eq!(date.len(), 10);
    assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
}

#[tokio::test]
async fn symbols_with_punctuation_get_quoted_tables() {
    let h = harness(SqlAccess::ReadWrite);

    let report = h.ingestion.ingest(&symbols(&["brk-b"])).await;

    assert_eq!(report.stored_symbols(), vec!["BRK-B"]);
    let result = h.query.execute("SELECT COUNT(*) FROM \"BRK-B\"").unwrap();
    assert_eq!(result.rows[0][0], CellValue::Integer(FIXTURE_DAYS));
}

#[tokio::test]
async fn missing_table_is_a_query_error() {
    let h = harness(SqlAccess::ReadWrite);

    let err = h
        .query
        .execute("SELECT * FROM nonexistent_table")
        .unwrap_err();

    match err {
        QueryError::Execution(msg) => assert!(msg.contains("no such table"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn read_write_mode_allows_ddl() {
    let h = harness(SqlAccess::ReadWrite);
    h.ingestion.ingest(&symbols(&["AAPL"])).await;

    h.query.execute("DROP TABLE AAPL").unwrap();

    assert!(h.store.list_tables().unwrap().is_empty());
}

#[tokio::test]
async fn read_only_mode_rejects_writes() {
    let h = harness(SqlAccess::ReadOnly);
    h.ingestion.ingest(&symbols(&["AAPL"])).await;

    let err = h.query.execute("DROP TABLE AAPL").unwrap_err();

    assert!(matches!(err, QueryError::Execution(_)));
    assert_eq!(count_rows(&h, "AAPL"), FIXTURE_DAYS);
}
