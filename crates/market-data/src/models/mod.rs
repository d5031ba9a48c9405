//! Market data models
//!
//! - `quote` - Daily quote data (Quote)
//! - `range` - History request range (HistoryRange)

mod quote;
mod range;

pub use quote::Quote;
pub use range::HistoryRange;
