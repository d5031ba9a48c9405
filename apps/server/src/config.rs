use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use stockdesk_core::constants::DEFAULT_DB_PATH;
use stockdesk_core::store::SqlAccess;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub sql_access: SqlAccess,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            db_path: DEFAULT_DB_PATH.to_string(),
            sql_access: SqlAccess::ReadWrite,
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(120_000),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = match std::env::var("SD_LISTEN_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("Invalid SD_LISTEN_ADDR: {addr}"))?,
            Err(_) => defaults.listen_addr,
        };
        let db_path = std::env::var("SD_DB_PATH").unwrap_or(defaults.db_path);
        let sql_access = match std::env::var("SD_SQL_READ_ONLY") {
            Ok(v) if parse_flag(&v) => SqlAccess::ReadOnly,
            _ => SqlAccess::ReadWrite,
        };
        let cors_allow = std::env::var("SD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("SD_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "120000".into())
            .parse()
            .unwrap_or(120_000);

        Ok(Self {
            listen_addr,
            db_path,
            sql_access,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
