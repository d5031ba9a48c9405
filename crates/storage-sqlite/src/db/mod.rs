use log::{debug, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use stockdesk_core::errors::{DatabaseError, Error, Result};

use crate::errors::IntoCore;

pub mod write_actor;
pub use write_actor::{spawn_writer, WriteHandle};

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Per-connection settings applied when the pool opens a connection.
fn configure_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA synchronous = NORMAL;")
}

fn store_unavailable(path: &str, reason: impl ToString) -> Error {
    Error::Database(DatabaseError::StoreUnavailable {
        path: path.to_string(),
        reason: reason.to_string(),
    })
}

/// Make sure the database file exists and is usable, creating parent
/// directories and an empty database as needed. Safe to call repeatedly.
pub fn init(db_path: &str) -> Result<String> {
    let path = Path::new(db_path);

    // 1. Ensure directory exists
    if let Some(db_dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !db_dir.exists() {
            fs::create_dir_all(db_dir).map_err(|e| store_unavailable(db_path, e))?;
        }
    }

    // 2. Open (creating the file if missing) and set connection-wide pragmas
    let conn = Connection::open(path).map_err(|e| store_unavailable(db_path, e))?;
    conn.execute_batch(
        "
            PRAGMA journal_mode = WAL;
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous  = NORMAL;
        ",
    )
    .map_err(|e| store_unavailable(db_path, e))?;

    info!("Database ready at {}", db_path);
    Ok(db_path.to_string())
}

pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = SqliteConnectionManager::file(db_path).with_init(configure_connection);
    let pool = r2d2::Pool::builder()
        .max_size(8)
        .min_idle(Some(1)) // Keep at least one connection ready
        .connection_timeout(Duration::from_secs(30))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get().into_core()
}

/// Open a connection the engine will refuse to write through.
pub fn open_read_only(db_path: &str) -> Result<Connection> {
    debug!("Opening read-only connection to {}", db_path);
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(db_path, flags).into_core()?;
    conn.busy_timeout(BUSY_TIMEOUT).into_core()?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested/data/stocks.db");
        let db_path = db_path.to_str().unwrap();

        assert_eq!(init(db_path).unwrap(), db_path);
        assert!(Path::new(db_path).exists());

        // Second call is a no-op
        assert!(init(db_path).is_ok());
    }

    #[test]
    fn test_init_reports_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();
        let db_path = blocker.join("stocks.db");

        let err = init(db_path.to_str().unwrap()).unwrap_err();
        match err {
            Error::Database(DatabaseError::StoreUnavailable { path, .. }) => {
                assert!(path.ends_with("stocks.db"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_only_connection_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("stocks.db");
        let db_path = db_path.to_str().unwrap();
        init(db_path).unwrap();

        let conn = open_read_only(db_path).unwrap();
        let err = conn
            .execute_batch("CREATE TABLE t (x INTEGER)")
            .unwrap_err();
        assert!(err.to_string().contains("readonly"), "{err}");
    }

    #[test]
    fn test_pool_connections_share_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("stocks.db");
        let db_path = db_path.to_str().unwrap();
        init(db_path).unwrap();
        let pool = create_pool(db_path).unwrap();

        get_connection(&pool)
            .unwrap()
            .execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);")
            .unwrap();
        let count: i64 = get_connection(&pool)
            .unwrap()
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_pool_connections_get_busy_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("stocks.db");
        let db_path = db_path.to_str().unwrap();
        init(db_path).unwrap();
        let pool = create_pool(db_path).unwrap();

        let conn = get_connection(&pool).unwrap();
        let timeout: i64 = conn
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .unwrap();
        let synchronous: i64 = conn
            .query_row("PRAGMA synchronous", [], |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 30_000);
        // NORMAL
        assert_eq!(synchronous, 1);
    }
}
