use crate::errors::Result;
use crate::query::QueryOutcome;
use crate::symbols::Symbol;

/// Trait for query service operations
pub trait QueryServiceTrait: Send + Sync {
    /// Run the SQL exactly as given. Failures come back as
    /// [`QueryError`](crate::query::QueryError), never as panics.
    fn execute(&self, sql: &str) -> QueryOutcome;

    fn table_exists(&self, symbol: &Symbol) -> Result<bool>;

    fn list_tables(&self) -> Result<Vec<String>>;
}
