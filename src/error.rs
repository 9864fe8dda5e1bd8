//! Error types for the regression and forecast engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Errors raised while splitting, fitting, or forecasting a sequence.
///
/// The engine never recovers from these itself; they propagate to the
/// caller, which decides how to report them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// Input sequence is empty.
    #[error("empty input data")]
    EmptyData,

    /// Not enough points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Feature and target lengths differ.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A value is NaN or infinite.
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },

    /// All feature values are identical, so no line can be fitted.
    #[error("cannot fit a line: feature has zero variance")]
    DegenerateFeature,

    /// An intermediate or fitted quantity left the range of `f64`.
    #[error("numeric overflow: {0}")]
    Overflow(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
