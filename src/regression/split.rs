//! Seeded train/test partitioning of a sequence's positions.

use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};

use crate::error::{RegressionError, Result};

/// Positions of a sequence split into a training and a held-out partition.
///
/// Both vectors hold indices into the original sequence in shuffled order.
/// The same `(n, test_fraction, seed)` always yields the same split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    /// Indices used to fit the model.
    pub train: Vec<usize>,
    /// Held-out indices used for evaluation.
    pub test: Vec<usize>,
}

impl TrainTestSplit {
    /// Number of held-out positions for a sequence of `n` elements.
    ///
    /// Rounds up, so any non-empty sequence holds out at least one element.
    pub fn test_size(n: usize, test_fraction: f64) -> usize {
        (test_fraction * n as f64).ceil() as usize
    }

    /// Shuffles `0..n` with a seeded RNG and cuts it into test and train.
    ///
    /// # Arguments
    ///
    /// * `n` - Sequence length
    /// * `test_fraction` - Share of positions held out, in `(0, 1)`
    /// * `seed` - RNG seed for the permutation
    ///
    /// # Errors
    ///
    /// Returns an error if `test_fraction` is outside `(0, 1)` or if either
    /// partition would be empty.
    pub fn new(n: usize, test_fraction: f64, seed: u64) -> Result<Self> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(RegressionError::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {test_fraction}"
            )));
        }
        if n == 0 {
            return Err(RegressionError::EmptyData);
        }

        let n_test = Self::test_size(n, test_fraction);
        let n_train = n - n_test.min(n);
        if n_train == 0 {
            return Err(RegressionError::InsufficientData {
                needed: n_test + 1,
                got: n,
            });
        }

        let mut permutation: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        permutation.shuffle(&mut rng);

        let train = permutation.split_off(n_test);
        Ok(Self {
            train,
            test: permutation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rounds_up() {
        assert_eq!(TrainTestSplit::test_size(10, 0.2), 2);
        assert_eq!(TrainTestSplit::test_size(11, 0.2), 3);
        assert_eq!(TrainTestSplit::test_size(3, 0.2), 1);
        assert_eq!(TrainTestSplit::test_size(1, 0.2), 1);
    }

    #[test]
    fn partitions_cover_every_index_once() {
        let split = TrainTestSplit::new(23, 0.2, 42).expect("split should succeed");
        assert_eq!(split.test.len(), 5);
        assert_eq!(split.train.len(), 18);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_gives_same_split() {
        let a = TrainTestSplit::new(50, 0.2, 42).expect("first split");
        let b = TrainTestSplit::new(50, 0.2, 42).expect("second split");
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_single_element() {
        let err = TrainTestSplit::new(1, 0.2, 42).unwrap_err();
        assert_eq!(err, RegressionError::InsufficientData { needed: 2, got: 1 });
    }

    #[test]
    fn rejects_empty_sequence() {
        assert_eq!(
            TrainTestSplit::new(0, 0.2, 42).unwrap_err(),
            RegressionError::EmptyData
        );
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        assert!(TrainTestSplit::new(10, 0.0, 42).is_err());
        assert!(TrainTestSplit::new(10, 1.0, 42).is_err());
        assert!(TrainTestSplit::new(10, f64::NAN, 42).is_err());
    }
}
