//! Shuffle-split cross-validation planner

use crate::error::{KolosalError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A single train/test split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CVSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// Independent random train/test partitions.
///
/// Sizes are fractions of the dataset; without `train_size` the training set
/// is the complement of the test set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidator {
    n_splits: usize,
    test_size: f64,
    train_size: Option<f64>,
    random_state: Option<u64>,
}

impl Default for CrossValidator {
    fn default() -> Self {
        Self::shuffle_split(20, 0.3).with_random_state(0)
    }
}

impl CrossValidator {
    /// Shuffle-split plan with the complement of `test_size` used for training
    pub fn shuffle_split(n_splits: usize, test_size: f64) -> Self {
        Self {
            n_splits,
            test_size,
            train_size: None,
            random_state: None,
        }
    }

    /// Use `floor(train_size * n)` training rows instead of the complement
    pub fn with_train_size(mut self, train_size: f64) -> Self {
        self.train_size = Some(train_size);
        self
    }

    /// Set random state for reproducibility
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Number of splits this plan produces
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.random_state {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// (n_train, n_test) over `n_samples`
    fn split_sizes(&self, n_samples: usize) -> Result<(usize, usize)> {
        let check_fraction = |name: &str, value: f64| {
            if value <= 0.0 || value >= 1.0 || !value.is_finite() {
                return Err(KolosalError::InvalidParameter {
                    name: name.to_string(),
                    value: value.to_string(),
                    reason: "must be a fraction in (0, 1)".to_string(),
                });
            }
            Ok(())
        };
        check_fraction("test_size", self.test_size)?;
        if let Some(train) = self.train_size {
            check_fraction("train_size", train)?;
        }

        let n_test = (self.test_size * n_samples as f64).ceil() as usize;
        let n_train = match self.train_size {
            Some(train) => (train * n_samples as f64).floor() as usize,
            None => n_samples.saturating_sub(n_test),
        };

        if n_train == 0 || n_test == 0 {
            return Err(KolosalError::ValidationError(format!(
                "With n_samples = {}, test_size = {} the resulting train set is empty",
                n_samples, self.test_size
            )));
        }
        if n_train + n_test > n_samples {
            return Err(KolosalError::ValidationError(format!(
                "train ({}) + test ({}) samples exceed n_samples ({})",
                n_train, n_test, n_samples
            )));
        }

        Ok((n_train, n_test))
    }

    /// Generate train/test splits.
    ///
    /// Each split is a fresh permutation of `0..n_samples` drawn from one
    /// seeded generator: the first `n_test` indices are held out, the next
    /// `n_train` are used for training.
    pub fn split(&self, n_samples: usize) -> Result<Vec<CVSplit>> {
        if self.n_splits == 0 {
            return Err(KolosalError::ValidationError(
                "n_splits must be at least 1".to_string(),
            ));
        }
        let (n_train, n_test) = self.split_sizes(n_samples)?;

        let mut rng = self.rng();
        let mut indices: Vec<usize> = (0..n_samples).collect();

        let splits = (0..self.n_splits)
            .map(|fold_idx| {
                indices.sort_unstable();
                indices.shuffle(&mut rng);
                CVSplit {
                    test_indices: indices[..n_test].to_vec(),
                    train_indices: indices[n_test..n_test + n_train].to_vec(),
                    fold_idx,
                }
            })
            .collect();

        Ok(splits)
    }
}
