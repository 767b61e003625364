//! Estimator traits and scoring

use crate::error::{KolosalError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// A trainable regression model
pub trait Estimator: Send {
    /// Fit the model to training data
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Make predictions
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}

/// A fully specified model configuration that can produce fresh, unfitted
/// estimators any number of times.
pub trait EstimatorConfig: Sync {
    type Estimator: Estimator;

    /// Build an unfitted estimator
    fn build(&self) -> Self::Estimator;

    /// Short human-readable label, used in logs and panel titles
    fn describe(&self) -> String;
}

/// Metric used to score predictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Scoring {
    /// Coefficient of determination
    #[default]
    R2,
}

impl Scoring {
    /// Score predictions against ground truth
    pub fn score(&self, y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        if y_true.len() != y_pred.len() {
            return Err(KolosalError::ShapeError {
                expected: format!("{} predictions", y_true.len()),
                actual: format!("{} predictions", y_pred.len()),
            });
        }
        Ok(match self {
            Scoring::R2 => r2_score(y_true, y_pred),
        })
    }
}

/// Coefficient of determination.
///
/// Undefined (NaN) for fewer than two samples. For a constant target the
/// score is 1.0 when the prediction is exact and 0.0 otherwise.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let n = y_true.len();
    if n < 2 {
        return f64::NAN;
    }

    let y_mean = y_true.sum() / n as f64;
    let ss_tot: f64 = y_true.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
