use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use stockdesk_core::session::SessionSnapshot;

use crate::main_lib::AppState;

async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/session", get(get_session))
}
