//! Symbols module - canonical ticker identity.

mod symbols_model;

pub use symbols_model::{parse_ticker_input, Symbol};
