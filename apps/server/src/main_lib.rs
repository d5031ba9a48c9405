use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use stockdesk_core::{
    ingestion::{IngestionService, IngestionServiceTrait},
    query::{QueryService, QueryServiceTrait},
    session::AppSession,
};
use stockdesk_market_data::{MarketDataProvider, YahooProvider};
use stockdesk_storage_sqlite::{create_pool, init, spawn_writer, PriceRepository};

use crate::config::Config;

pub struct AppState {
    pub ingestion_service: Arc<dyn IngestionServiceTrait>,
    pub query_service: Arc<dyn QueryServiceTrait>,
    pub session: Mutex<AppSession>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = Arc::new(YahooProvider::new()?);
    build_state_with_provider(config, provider).await
}

/// Wire the pipelines against an explicit provider.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    let writer = spawn_writer((*pool).clone());
    let store = Arc::new(PriceRepository::new(pool, writer, db_path));

    let ingestion_service = Arc::new(IngestionService::new(provider, store.clone()));
    let query_service = Arc::new(QueryService::new(store).with_access(config.sql_access));
    tracing::info!("SQL access mode: {:?}", config.sql_access);

    Ok(Arc::new(AppState {
        ingestion_service,
        query_service,
        session: Mutex::new(AppSession::new()),
    }))
}
