//! Score matrices and their per-position summaries

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Scores indexed by `[position, fold]`.
///
/// A position is one training-set size or one hyperparameter value; every
/// position is evaluated on the same folds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    scores: Array2<f64>,
}

impl ScoreMatrix {
    pub fn new(scores: Array2<f64>) -> Self {
        Self { scores }
    }

    pub fn n_positions(&self) -> usize {
        self.scores.nrows()
    }

    pub fn n_folds(&self) -> usize {
        self.scores.ncols()
    }

    /// Raw fold scores at one position
    pub fn position(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.scores.row(idx)
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.scores
    }

    /// Mean across folds, per position
    pub fn mean(&self) -> Array1<f64> {
        self.scores
            .mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::from_elem(self.n_positions(), f64::NAN))
    }

    /// Population standard deviation across folds, per position
    pub fn std(&self) -> Array1<f64> {
        self.scores.std_axis(Axis(1), 0.0)
    }

    pub fn summary(&self) -> CurveSummary {
        CurveSummary {
            mean: self.mean(),
            std: self.std(),
        }
    }
}

/// Mean and one-standard-deviation band of a score curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl CurveSummary {
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// `mean - std` per position
    pub fn lower(&self) -> Array1<f64> {
        &self.mean - &self.std
    }

    /// `mean + std` per position
    pub fn upper(&self) -> Array1<f64> {
        &self.mean + &self.std
    }
}
