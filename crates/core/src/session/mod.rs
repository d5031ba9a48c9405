//! Session module - per-user dashboard state.

mod session_model;

pub use session_model::{AppSession, SessionSnapshot};
