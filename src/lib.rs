//! Linear trend analysis and sliding-window forecasting over HTTP.

pub mod analysis;
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod forecast;
/// Least-squares fitting and train/test splitting.
pub mod regression;
pub mod telemetry;
