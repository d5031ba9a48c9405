use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use stockdesk_core::ingestion::IngestionReport;
use stockdesk_core::symbols::parse_ticker_input;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Accepts the raw text field (`"aapl, msft"`) or an explicit list.
#[derive(Deserialize)]
#[serde(untagged)]
enum TickerInput {
    Text(String),
    List(Vec<String>),
}

impl TickerInput {
    fn into_tickers(self) -> Vec<String> {
        match self {
            TickerInput::Text(text) => parse_ticker_input(&text),
            TickerInput::List(list) => list
                .iter()
                .flat_map(|entry| parse_ticker_input(entry))
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct IngestBody {
    tickers: TickerInput,
}

async fn ingest(
    State(state): State<Arc<AppState>>,
    Json(body): Json<IngestBody>,
) -> ApiResult<Json<IngestionReport>> {
    let submitted = body.tickers.into_tickers();
    if submitted.is_empty() {
        return Err(ApiError::BadRequest(
            "Please enter at least one ticker".to_string(),
        ));
    }

    let report = state.ingestion_service.ingest(&submitted).await;
    state
        .session
        .lock()
        .await
        .record_ingestion(&submitted, &report);
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ingest", post(ingest))
}
