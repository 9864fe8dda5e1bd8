//! Sliding-window trend forecasting.

use std::collections::VecDeque;

use crate::error::{RegressionError, Result};
use crate::regression::{LinearFit, index_feature};

/// Default number of trailing values the forecast window holds.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default number of future points to produce.
pub const DEFAULT_FUTURE_POINTS: usize = 8;

/// Rolling one-step-ahead forecaster.
///
/// Each step fits a fresh least-squares line to the current window against
/// the local index `0..w`, predicts the value at index `w`, then slides the
/// window forward by dropping its oldest value and appending the prediction.
/// Later steps therefore extrapolate from earlier predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindowForecast {
    /// Maximum window length; shrinks to the sequence length when shorter.
    pub window_size: usize,
    /// Number of future points to produce.
    pub future_points: usize,
}

impl Default for SlidingWindowForecast {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            future_points: DEFAULT_FUTURE_POINTS,
        }
    }
}

impl SlidingWindowForecast {
    /// Forecaster with an explicit window length and horizon.
    pub fn new(window_size: usize, future_points: usize) -> Self {
        Self {
            window_size,
            future_points,
        }
    }

    /// Effective window length for a sequence of `n` values.
    pub fn effective_window(&self, n: usize) -> usize {
        self.window_size.min(n)
    }

    /// Produce `future_points` predictions continuing `values`.
    ///
    /// # Arguments
    ///
    /// * `values` - Observed sequence, oldest first
    ///
    /// # Returns
    ///
    /// Predictions in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` is empty, the window holds fewer than
    /// two points, or a window fit or prediction overflows.
    pub fn forecast(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.is_empty() {
            return Err(RegressionError::EmptyData);
        }

        let w = self.effective_window(values.len());
        let xs = index_feature(w);
        let next_x = w as f64;

        let mut window: VecDeque<f64> = values[values.len() - w..].iter().copied().collect();
        let mut predictions = Vec::with_capacity(self.future_points);

        for _ in 0..self.future_points {
            let fit = LinearFit::fit(&xs, window.make_contiguous())?;
            let next = fit.predict(next_x);
            if !next.is_finite() {
                return Err(RegressionError::Overflow(format!(
                    "forecast step {} is not finite",
                    predictions.len() + 1
                )));
            }
            predictions.push(next);

            window.pop_front();
            window.push_back(next);
            debug_assert_eq!(window.len(), w);
        }

        Ok(predictions)
    }
}
