//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
    pub database: &'static str,
}

/// GET /health
///
/// Reports readiness without forcing a connection or waiting on one.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let connections = state.connections();
    let database = match connections.try_is_connected() {
        Some(true) => "connected",
        Some(false) if connections.has_database_url() => "disconnected",
        Some(false) => "unconfigured",
        None => "connecting",
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.mode().as_str(),
        database,
    })
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
