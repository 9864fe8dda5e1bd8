//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use trend_forecast::config::AnalysisConfig;

/// Default analysis configuration (window 5, 8 future points, 80/20 split, seed 42).
pub fn default_config() -> AnalysisConfig {
    AnalysisConfig::default()
}

/// Arithmetic progression `1, 2, ..., n`.
pub fn ramp(n: usize) -> Vec<f64> {
    (1..=n).map(|v| v as f64).collect()
}

/// Noisy upward trend with a fixed, hand-picked wobble.
pub fn noisy_trend() -> Vec<f64> {
    vec![
        10.2, 11.1, 11.9, 13.4, 13.8, 15.3, 15.9, 17.2, 18.1, 18.7, 20.4, 21.0,
    ]
}

/// Asserts `actual` is within `1e-9` of `expected`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
