//! Trend analysis of a single sequence: main fit plus rolling forecast.

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{RegressionError, Result};
use crate::forecast::SlidingWindowForecast;
use crate::regression::{LinearFit, TrainTestSplit, index_feature};

/// Everything computed for one input sequence.
///
/// `test_indices` and `test_predictions` are parallel: entry `i` of the
/// predictions is the fitted line evaluated at position `test_indices[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Slope of the line fitted on the training partition.
    pub slope: f64,
    /// Intercept of the line fitted on the training partition.
    pub intercept: f64,
    /// Coefficient of determination of that line over the whole sequence.
    pub r_squared: f64,
    /// Held-out positions, in partition order.
    pub test_indices: Vec<usize>,
    /// Fitted values at `test_indices`.
    pub test_predictions: Vec<f64>,
    /// Sliding-window forecast continuing the sequence.
    pub future_predictions: Vec<f64>,
}

/// Runs the full analysis for `values`.
///
/// The value at position `i` is regressed on `i`. The line is fitted on a
/// seeded training partition, scored against every point, and evaluated at
/// the held-out positions. The forecast is computed independently from the
/// trailing window of the sequence.
///
/// # Errors
///
/// Returns the first failure from splitting, fitting, scoring, or
/// forecasting, or an overflow error if any reported quantity is not finite.
/// A single value always fails since the split leaves nothing to train on.
/// Two values leave one training point, which is fitted as a flat line
/// through that point.
pub fn analyze(values: &[f64], config: &AnalysisConfig) -> Result<AnalysisReport> {
    if values.is_empty() {
        return Err(RegressionError::EmptyData);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(RegressionError::NonFinite { index });
    }

    let xs = index_feature(values.len());
    let split = TrainTestSplit::new(values.len(), config.test_fraction, config.seed)?;

    let train_x: Vec<f64> = split.train.iter().map(|&i| xs[i]).collect();
    let train_y: Vec<f64> = split.train.iter().map(|&i| values[i]).collect();
    let fit = LinearFit::fit_or_flat(&train_x, &train_y)?;

    let r_squared = fit.score(&xs, values)?;
    if !r_squared.is_finite() {
        return Err(RegressionError::Overflow(
            "coefficient of determination is not finite".into(),
        ));
    }
    let test_x: Vec<f64> = split.test.iter().map(|&i| xs[i]).collect();
    let test_predictions = fit.predict_many(&test_x);
    if test_predictions.iter().any(|p| !p.is_finite()) {
        return Err(RegressionError::Overflow(
            "held-out prediction is not finite".into(),
        ));
    }

    let forecaster = SlidingWindowForecast::new(config.window_size, config.future_points);
    let future_predictions = forecaster.forecast(values)?;

    debug!(
        n = values.len(),
        train = split.train.len(),
        test = split.test.len(),
        window = forecaster.effective_window(values.len()),
        slope = fit.slope,
        intercept = fit.intercept,
        r_squared,
        "analysis complete"
    );

    Ok(AnalysisReport {
        slope: fit.slope,
        intercept: fit.intercept,
        r_squared,
        test_indices: split.test,
        test_predictions,
        future_predictions,
    })
}
