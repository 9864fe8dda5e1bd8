//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use tracing::warn;

use super::AppState;
use super::types::{AnalyzeResponse, ApiError, HealthResponse, parse_values};
use crate::analysis;

/// Fits the trend and forecasts future points for the posted sequence.
///
/// `POST /analyze` → 200 + `AnalyzeResponse` JSON
/// missing/invalid body → 400 + `{"error": "No data provided"}`
/// computation failure → 500 + `{"error": <message>}`
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let values = parse_values(&body).inspect_err(log_failure)?;
    let report = analysis::analyze(&values, &state.analysis)
        .map_err(ApiError::from)
        .inspect_err(log_failure)?;
    Ok(Json(report.into()))
}

/// `GET /health` → 200 + crate version.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn log_failure(err: &ApiError) {
    warn!(status = err.status().as_u16(), error = %err, "analyze request failed");
}
