//! Query module - executes user SQL against the price store and shapes the
//! result for display.

mod query_model;
mod query_normalize;
mod query_service;
mod query_traits;
pub mod ticker_resolver;

pub use query_model::{QueryError, QueryOutcome, QueryResult};
pub use query_normalize::{normalize_column_name, parse_calendar_date, reformat_date_column};
pub use query_service::QueryService;
pub use query_traits::QueryServiceTrait;
pub use ticker_resolver::resolve_table;
