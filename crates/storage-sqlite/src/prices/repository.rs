use async_trait::async_trait;
use log::debug;
use rusqlite::{params_from_iter, Connection};
use std::sync::Arc;

use stockdesk_core::errors::Result;
use stockdesk_core::store::{PriceStoreTrait, PriceTable, SqlAccess, Table};
use stockdesk_core::symbols::Symbol;

use crate::db::{get_connection, open_read_only, DbPool, WriteHandle};
use crate::errors::{map_write_err, IntoCore};
use crate::utils::{column_type, from_sql_ref, quote_identifier, to_sql_value};

/// One table per symbol, named by the uppercased symbol.
pub struct PriceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    db_path: String,
}

impl PriceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, db_path: impl Into<String>) -> Self {
        Self {
            pool,
            writer,
            db_path: db_path.into(),
        }
    }
}

fn write_price_table(conn: &Connection, name: &str, table: &PriceTable) -> Result<usize> {
    let table_name = quote_identifier(name);

    let column_defs = table
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), column_type(c.kind)))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; table.columns.len()].join(", ");

    conn.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table_name}; CREATE TABLE {table_name} ({column_defs});"
    ))
    .map_err(map_write_err)?;

    let mut stmt = conn
        .prepare(&format!("INSERT INTO {table_name} VALUES ({placeholders})"))
        .map_err(map_write_err)?;
    for row in &table.rows {
        stmt.execute(params_from_iter(row.iter().map(to_sql_value)))
            .map_err(map_write_err)?;
    }

    Ok(table.row_count())
}

fn read_table(conn: &Connection, sql: &str) -> Result<Table> {
    let mut stmt = conn.prepare(sql).into_core()?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([]).into_core()?;
    while let Some(row) = cursor.next().into_core()? {
        let mut cells = Vec::with_capacity(width);
        for idx in 0..width {
            cells.push(from_sql_ref(row.get_ref(idx).into_core()?));
        }
        rows.push(cells);
    }

    Ok(Table { columns, rows })
}

#[async_trait]
impl PriceStoreTrait for PriceRepository {
    async fn replace_table(&self, symbol: &Symbol, table: PriceTable) -> Result<usize> {
        let name = symbol.to_string();
        debug!("Replacing table {} with {} rows", name, table.row_count());
        self.writer
            .exec(move |conn| write_price_table(conn, &name, &table))
            .await
    }

    fn run_query(&self, sql: &str, access: SqlAccess) -> Result<Table> {
        match access {
            SqlAccess::ReadWrite => {
                let conn = get_connection(&self.pool)?;
                read_table(&conn, sql)
            }
            SqlAccess::ReadOnly => {
                let conn = open_read_only(&self.db_path)?;
                read_table(&conn, sql)
            }
        }
    }

    fn table_exists(&self, symbol: &Symbol) -> Result<bool> {
        let conn = get_connection(&self.pool)?;
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE)",
            [symbol.as_str()],
            |row| row.get::<_, bool>(0),
        )
        .into_core()
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .into_core()?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .into_core()?
            .collect::<std::result::Result<Vec<_>, _>>()
            .into_core()?;
        Ok(names)
    }
}
