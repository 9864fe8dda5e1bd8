//! Closed-form simple linear regression.

use crate::error::{RegressionError, Result};

/// Slope and intercept of a line fitted by ordinary least squares.
///
/// A `LinearFit` is a plain value: every call to [`LinearFit::fit`] builds a
/// new one and nothing is cached between fits.
///
/// # Examples
///
/// ```
/// use trend_forecast::regression::LinearFit;
///
/// let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.predict(3.0) - 7.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change in the fitted value per unit of the feature.
    pub slope: f64,
    /// Fitted value where the feature is zero.
    pub intercept: f64,
}

impl LinearFit {
    /// Fits `ys` against `xs` by minimising the sum of squared residuals.
    ///
    /// # Arguments
    ///
    /// * `xs` - Feature values
    /// * `ys` - Target values, same length as `xs`
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length, are empty, contain a
    /// non-finite value, hold fewer than two distinct feature values, or if
    /// the fitted coefficients overflow.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_points(xs, ys, 2)?;
        let m = Moments::of(xs, ys);
        if m.sxx == 0.0 {
            return Err(RegressionError::DegenerateFeature);
        }
        Self::checked(m.sxy / m.sxx, m)
    }

    /// Like [`LinearFit::fit`], but a single point or a constant feature
    /// yields the flat line through the mean of `ys` instead of an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length, are empty, contain a
    /// non-finite value, or if the fitted coefficients overflow.
    pub fn fit_or_flat(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_points(xs, ys, 1)?;
        let m = Moments::of(xs, ys);
        if m.sxx == 0.0 {
            return Self::checked(0.0, m);
        }
        Self::checked(m.sxy / m.sxx, m)
    }

    fn checked(slope: f64, m: Moments) -> Result<Self> {
        let intercept = m.y_mean - slope * m.x_mean;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(RegressionError::Overflow(
                "fitted line coefficients are not finite".into(),
            ));
        }
        Ok(Self { slope, intercept })
    }

    /// Value of the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Values of the fitted line at each of `xs`, in order.
    pub fn predict_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Coefficient of determination of this line over the given points.
    ///
    /// When `ys` has zero variance the ratio is undefined; the score is then
    /// `1.0` if the line reproduces the values exactly and `0.0` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length or are empty.
    pub fn score(&self, xs: &[f64], ys: &[f64]) -> Result<f64> {
        if xs.len() != ys.len() {
            return Err(RegressionError::DimensionMismatch {
                expected: xs.len(),
                got: ys.len(),
            });
        }
        if ys.is_empty() {
            return Err(RegressionError::EmptyData);
        }

        let y_mean = ys.iter().sum::<f64>() / ys.len() as f64;
        let (ss_res, ss_tot) = xs
            .iter()
            .zip(ys)
            .fold((0.0, 0.0), |(res, tot), (&x, &y)| {
                let residual = y - self.predict(x);
                let deviation = y - y_mean;
                (res + residual * residual, tot + deviation * deviation)
            });

        if ss_tot == 0.0 {
            return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(1.0 - ss_res / ss_tot)
    }
}

/// Synthetic index feature `0, 1, ..., n - 1`.
pub fn index_feature(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

struct Moments {
    x_mean: f64,
    y_mean: f64,
    sxx: f64,
    sxy: f64,
}

impl Moments {
    fn of(xs: &[f64], ys: &[f64]) -> Self {
        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - x_mean;
            sxx += dx * dx;
            sxy += dx * (y - y_mean);
        }

        Self {
            x_mean,
            y_mean,
            sxx,
            sxy,
        }
    }
}

fn check_points(xs: &[f64], ys: &[f64], needed: usize) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(RegressionError::DimensionMismatch {
            expected: xs.len(),
            got: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(RegressionError::EmptyData);
    }
    if xs.len() < needed {
        return Err(RegressionError::InsufficientData {
            needed,
            got: xs.len(),
        });
    }
    if let Some(index) = first_non_finite(xs).or_else(|| first_non_finite(ys)) {
        return Err(RegressionError::NonFinite { index });
    }
    Ok(())
}

fn first_non_finite(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| !v.is_finite())
}
