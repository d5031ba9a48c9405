use std::sync::Arc;

use log::{debug, error};

use crate::errors::{DatabaseError, Error, Result};
use crate::query::query_normalize::{normalize_column_name, reformat_date_column};
use crate::query::{QueryError, QueryOutcome, QueryResult, QueryServiceTrait};
use crate::store::{PriceStoreTrait, SqlAccess};
use crate::symbols::Symbol;

pub struct QueryService {
    store: Arc<dyn PriceStoreTrait>,
    access: SqlAccess,
}

impl QueryService {
    pub fn new(store: Arc<dyn PriceStoreTrait>) -> Self {
        Self {
            store,
            access: SqlAccess::default(),
        }
    }

    pub fn with_access(mut self, access: SqlAccess) -> Self {
        self.access = access;
        self
    }

    pub fn access(&self) -> SqlAccess {
        self.access
    }
}

fn engine_message(err: Error) -> String {
    match err {
        Error::Database(DatabaseError::QueryFailed(msg)) => msg,
        other => other.to_string(),
    }
}

impl QueryServiceTrait for QueryService {
    fn execute(&self, sql: &str) -> QueryOutcome {
        if sql.trim().is_empty() {
            return Err(QueryError::Empty);
        }

        debug!("Executing query ({:?}): {}", self.access, sql);
        let table = self.store.run_query(sql, self.access).map_err(|e| {
            let message = engine_message(e);
            error!("Error executing query: {}", message);
            QueryError::Execution(message)
        })?;

        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|c| normalize_column_name(c))
            .collect();
        let mut rows = table.rows;
        reformat_date_column(&columns, &mut rows);

        Ok(QueryResult { columns, rows })
    }

    fn table_exists(&self, symbol: &Symbol) -> Result<bool> {
        self.store.table_exists(symbol)
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        self.store.list_tables()
    }
}
