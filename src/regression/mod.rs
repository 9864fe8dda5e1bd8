//! Least-squares line fitting and seeded train/test partitioning.

mod ols;
mod split;

pub use ols::{LinearFit, index_feature};
pub use split::TrainTestSplit;
