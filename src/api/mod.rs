//! REST API for trend analysis.
//!
//! Provides:
//! - `POST /analyze`: trend fit, held-out predictions, and sliding-window forecast
//! - `GET /health`: liveness check

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AnalysisConfig;

pub use types::{AnalyzeResponse, ApiError, ErrorResponse, NO_DATA_MESSAGE, parse_values};

/// Immutable application state shared across all request handlers.
///
/// Only configuration lives here; every request computes its own model.
pub struct AppState {
    /// Parameters applied to every analysis.
    pub analysis: AnalysisConfig,
}

/// Builds the axum router with all API routes.
///
/// Cross-origin requests are allowed from any origin.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Binds to the given address and serves the API until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to `addr` or the server
/// fails while running.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
