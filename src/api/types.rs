//! API request, response, and error types.
//!
//! Field names are the public JSON contract of `POST /analyze`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::analysis::AnalysisReport;
use crate::error::RegressionError;

/// Message returned when the request carries no usable `values` field.
pub const NO_DATA_MESSAGE: &str = "No data provided";

/// Successful analysis response.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Slope of the trend line.
    pub slope: f64,
    /// Intercept of the trend line.
    pub intercept: f64,
    /// Coefficient of determination over the whole sequence.
    pub r_squared: f64,
    /// Trend line evaluated at the held-out positions.
    pub test_predictions: Vec<f64>,
    /// Held-out positions, parallel to `test_predictions`.
    pub test_indices: Vec<usize>,
    /// Sliding-window forecast.
    pub future_predictions: Vec<f64>,
}

impl From<AnalysisReport> for AnalyzeResponse {
    fn from(r: AnalysisReport) -> Self {
        Self {
            slope: r.slope,
            intercept: r.intercept,
            r_squared: r.r_squared,
            test_predictions: r.test_predictions,
            test_indices: r.test_indices,
            future_predictions: r.future_predictions,
        }
    }
}

/// Liveness check body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Failure of an API request.
///
/// `Validation` maps to 400 with a fixed message; `Computation` maps to 500
/// and carries the underlying error text.
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("No data provided")]
    Validation,
    #[error("{0}")]
    Computation(String),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegressionError> for ApiError {
    fn from(err: RegressionError) -> Self {
        Self::Computation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Extracts the numeric sequence from a raw `POST /analyze` body.
///
/// A body that is not JSON, is not an object, or has no `values` key is a
/// validation error. A `values` field that is not an array of numbers is a
/// computation error, reported with the offending position.
pub fn parse_values(body: &[u8]) -> Result<Vec<f64>, ApiError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| ApiError::Validation)?;
    let values = payload
        .as_object()
        .and_then(|fields| fields.get("values"))
        .ok_or(ApiError::Validation)?;

    let items = values.as_array().ok_or_else(|| {
        ApiError::Computation(format!(
            "`values` must be an array of numbers, got {}",
            json_kind(values)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_f64().ok_or_else(|| {
                ApiError::Computation(format!(
                    "`values[{i}]` must be a number, got {}",
                    json_kind(item)
                ))
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
