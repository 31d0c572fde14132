//! Novel — HTTP surface for the manuscript checks.

use axum::Router;

pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Builds the application router without transport layers.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/checks", routes::checks::router())
        .with_state(app_state)
}
