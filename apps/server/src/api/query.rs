use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use stockdesk_core::query::{resolve_table, QueryOutcome, QueryResult, QueryServiceTrait};
use stockdesk_core::symbols::Symbol;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct QueryBody {
    sql: String,
}

/// Whether the table a query names has been stored. Names that are not
/// valid symbols (`nonexistent_table`) are looked up among all tables.
fn table_is_present(query_service: &dyn QueryServiceTrait, name: &str) -> ApiResult<bool> {
    match Symbol::parse(name) {
        Ok(symbol) => Ok(query_service.table_exists(&symbol)?),
        Err(_) => Ok(query_service
            .list_tables()?
            .iter()
            .any(|t| t.eq_ignore_ascii_case(name))),
    }
}

/// Blocking part of a query: the table check followed by execution.
fn check_and_execute(query_service: &dyn QueryServiceTrait, sql: &str) -> ApiResult<QueryOutcome> {
    if let Some(table) = resolve_table(sql) {
        if !table_is_present(query_service, &table)? {
            return Err(ApiError::NotFound(format!(
                "Table `{}` does not exist. Please extract data first.",
                table
            )));
        }
    }
    Ok(query_service.execute(sql))
}

async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryBody>,
) -> ApiResult<Json<QueryResult>> {
    state.session.lock().await.observe_query(&body.sql);

    let query_service = Arc::clone(&state.query_service);
    let outcome = tokio::task::spawn_blocking(move || {
        check_and_execute(query_service.as_ref(), &body.sql)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Query task failed: {}", e)))??;

    state.session.lock().await.record_query(outcome.clone());
    Ok(Json(outcome?))
}

async fn list_tables(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.query_service.list_tables()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/query", post(run_query))
        .route("/tables", get(list_tables))
}
