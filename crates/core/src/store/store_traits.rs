use async_trait::async_trait;

use crate::errors::Result;
use crate::store::{PriceTable, SqlAccess, Table};
use crate::symbols::Symbol;

/// Trait for price store operations
#[async_trait]
pub trait PriceStoreTrait: Send + Sync {
    /// Drop the symbol's table if present and recreate it from `table`.
    ///
    /// Implementations must make the replacement atomic: a reader sees either
    /// the previous table or the complete new one. Returns rows written.
    async fn replace_table(&self, symbol: &Symbol, table: PriceTable) -> Result<usize>;

    /// Execute one SQL statement and return every row it produces.
    fn run_query(&self, sql: &str, access: SqlAccess) -> Result<Table>;

    fn table_exists(&self, symbol: &Symbol) -> Result<bool>;

    /// Names of all user tables, sorted.
    fn list_tables(&self) -> Result<Vec<String>>;
}
