//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the default root is unreadable.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Whether the server's default project root is a directory.
    pub root_dir_ready: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let root_dir_ready = state.root_dir.is_dir();
    Json(HealthResponse {
        status: if root_dir_ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        root_dir_ready,
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
