//! Novel manuscript diagnostic API server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use novel_api::build_router;
use novel_api::error::AppError;
use novel_api::state::AppState;
use novel_core::clock::SystemClock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Novel manuscript diagnostic API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
    let root_dir = PathBuf::from(std::env::var("NOVEL_ROOT_DIR").unwrap_or_else(|_| ".".to_string()));
    if !root_dir.is_dir() {
        return Err(AppError::Config(format!(
            "NOVEL_ROOT_DIR {} is not a directory",
            root_dir.display()
        )));
    }

    // Build application state.
    let app_state = AppState::new(Arc::new(SystemClock), root_dir);
    tracing::info!(root_dir = %app_state.root_dir.display(), "default project root");

    // Build router.
    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
