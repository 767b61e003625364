//! Learning and validation curves
//!
//! Both curves share one evaluation primitive: fit a fresh estimator on a
//! subset of a split's training indices, then score it on those same
//! training rows and on the split's held-out rows.

use super::scores::ScoreMatrix;
use crate::error::{KolosalError, Result};
use crate::training::{CVSplit, CrossValidator, Estimator, EstimatorConfig, Scoring};
use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Output of [`learning_curve`]
#[derive(Debug, Clone)]
pub struct LearningCurveScores {
    /// Training-set sizes actually evaluated (sorted, deduplicated)
    pub sizes: Vec<usize>,
    /// `[size, fold]` scores on the training subset
    pub train_scores: ScoreMatrix,
    /// `[size, fold]` scores on the held-out rows
    pub test_scores: ScoreMatrix,
}

/// Output of [`validation_curve`]
#[derive(Debug, Clone)]
pub struct ValidationCurveScores {
    /// `[config, fold]` scores on the training rows
    pub train_scores: ScoreMatrix,
    /// `[config, fold]` scores on the held-out rows
    pub test_scores: ScoreMatrix,
}

fn check_dataset(x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(KolosalError::ShapeError {
            expected: format!("y length = {}", x.nrows()),
            actual: format!("y length = {}", y.len()),
        });
    }
    Ok(())
}

/// Fit on `train_idx`, return (train score, test score)
fn fit_and_score<C: EstimatorConfig>(
    config: &C,
    x: &Array2<f64>,
    y: &Array1<f64>,
    train_idx: &[usize],
    test_idx: &[usize],
    scoring: Scoring,
) -> Result<(f64, f64)> {
    let x_train = x.select(Axis(0), train_idx);
    let y_train = y.select(Axis(0), train_idx);
    let x_test = x.select(Axis(0), test_idx);
    let y_test = y.select(Axis(0), test_idx);

    let mut estimator = config.build();
    estimator.fit(&x_train, &y_train)?;

    let train_score = scoring.score(&y_train, &estimator.predict(&x_train)?)?;
    let test_score = scoring.score(&y_test, &estimator.predict(&x_test)?)?;
    Ok((train_score, test_score))
}

/// Evaluate `n_positions × splits` jobs in parallel and pack the results
/// into `[position, fold]` matrices.
fn evaluate_grid<F>(
    n_positions: usize,
    splits: &[CVSplit],
    job: F,
) -> Result<(ScoreMatrix, ScoreMatrix)>
where
    F: Fn(usize, &CVSplit) -> Result<(f64, f64)> + Sync,
{
    let n_folds = splits.len();
    let results: Vec<(f64, f64)> = (0..n_positions * n_folds)
        .into_par_iter()
        .map(|job_idx| job(job_idx / n_folds, &splits[job_idx % n_folds]))
        .collect::<Result<Vec<_>>>()?;

    let train = Array2::from_shape_fn((n_positions, n_folds), |(p, f)| results[p * n_folds + f].0);
    let test = Array2::from_shape_fn((n_positions, n_folds), |(p, f)| results[p * n_folds + f].1);
    Ok((ScoreMatrix::new(train), ScoreMatrix::new(test)))
}

/// Scores of one model configuration trained on growing prefixes of each
/// split's training indices.
///
/// Duplicate sizes are dropped. Every size must lie in
/// `1..=min training split size`.
pub fn learning_curve<C: EstimatorConfig>(
    config: &C,
    x: &Array2<f64>,
    y: &Array1<f64>,
    cv: &CrossValidator,
    train_sizes: &[usize],
    scoring: Scoring,
) -> Result<LearningCurveScores> {
    check_dataset(x, y)?;
    let splits = cv.split(x.nrows())?;

    let mut sizes = train_sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();
    if sizes.len() < train_sizes.len() {
        warn!(
            requested = train_sizes.len(),
            kept = sizes.len(),
            "Removed duplicate training sizes"
        );
    }
    if sizes.is_empty() {
        return Err(KolosalError::ValidationError(
            "train_sizes must not be empty".to_string(),
        ));
    }

    let max_train = splits
        .iter()
        .map(|s| s.train_indices.len())
        .min()
        .unwrap_or(0);
    if sizes[0] == 0 || sizes[sizes.len() - 1] > max_train {
        return Err(KolosalError::InvalidParameter {
            name: "train_sizes".to_string(),
            value: format!("{:?}", sizes),
            reason: format!("must lie within 1..={}", max_train),
        });
    }

    debug!(model = %config.describe(), sizes = ?sizes, folds = splits.len(), "Computing learning curve");

    let (train_scores, test_scores) = evaluate_grid(sizes.len(), &splits, |pos, split| {
        fit_and_score(
            config,
            x,
            y,
            &split.train_indices[..sizes[pos]],
            &split.test_indices,
            scoring,
        )
    })?;

    Ok(LearningCurveScores {
        sizes,
        train_scores,
        test_scores,
    })
}

/// Scores of each configuration in `configs`, trained on the full training
/// portion of every split. Rows follow the order of `configs`.
pub fn validation_curve<C: EstimatorConfig>(
    configs: &[C],
    x: &Array2<f64>,
    y: &Array1<f64>,
    cv: &CrossValidator,
    scoring: Scoring,
) -> Result<ValidationCurveScores> {
    check_dataset(x, y)?;
    if configs.is_empty() {
        return Err(KolosalError::ValidationError(
            "validation curve needs at least one configuration".to_string(),
        ));
    }
    let splits = cv.split(x.nrows())?;

    debug!(configs = configs.len(), folds = splits.len(), "Computing validation curve");

    let (train_scores, test_scores) = evaluate_grid(configs.len(), &splits, |pos, split| {
        fit_and_score(
            &configs[pos],
            x,
            y,
            &split.train_indices,
            &split.test_indices,
            scoring,
        )
    })?;

    Ok(ValidationCurveScores {
        train_scores,
        test_scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::DecisionTreeConfig;
    use ndarray::Array;

    fn step_data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array::from_shape_fn((n, 1), |(i, _)| i as f64);
        let y = Array::from_shape_fn(n, |i| if i < n / 2 { 0.0 } else { 1.0 });
        (x, y)
    }

    #[test]
    fn test_learning_curve_shapes() {
        let (x, y) = step_data(40);
        let cv = CrossValidator::shuffle_split(5, 0.3).with_random_state(0);
        let scores = learning_curve(
            &DecisionTreeConfig::default().with_max_depth(2),
            &x,
            &y,
            &cv,
            &[2, 10, 20, 28],
            Scoring::R2,
        )
        .unwrap();

        assert_eq!(scores.sizes, vec![2, 10, 20, 28]);
        assert_eq!(scores.train_scores.as_array().dim(), (4, 5));
        assert_eq!(scores.test_scores.as_array().dim(), (4, 5));
    }

    #[test]
    fn test_learning_curve_dedups_sizes() {
        let (x, y) = step_data(20);
        let cv = CrossValidator::shuffle_split(3, 0.3).with_random_state(0);
        let scores = learning_curve(
            &DecisionTreeConfig::default(),
            &x,
            &y,
            &cv,
            &[5, 2, 5, 2, 9],
            Scoring::R2,
        )
        .unwrap();
        assert_eq!(scores.sizes, vec![2, 5, 9]);
        assert_eq!(scores.train_scores.n_positions(), 3);
    }

    #[test]
    fn test_learning_curve_rejects_oversized_schedule() {
        let (x, y) = step_data(20);
        let cv = CrossValidator::shuffle_split(3, 0.3).with_random_state(0);
        let err = learning_curve(&DecisionTreeConfig::default(), &x, &y, &cv, &[5, 15], Scoring::R2)
            .unwrap_err();
        assert!(matches!(err, KolosalError::InvalidParameter { .. }));

        let err = learning_curve(&DecisionTreeConfig::default(), &x, &y, &cv, &[0, 5], Scoring::R2)
            .unwrap_err();
        assert!(matches!(err, KolosalError::InvalidParameter { .. }));
    }

    #[test]
    fn test_shape_mismatch_propagates() {
        let (x, _) = step_data(20);
        let y = Array1::zeros(19);
        let cv = CrossValidator::shuffle_split(3, 0.3).with_random_state(0);
        let err = validation_curve(&[DecisionTreeConfig::default()], &x, &y, &cv, Scoring::R2)
            .unwrap_err();
        assert!(matches!(err, KolosalError::ShapeError { .. }));
    }

    #[test]
    fn test_invalid_config_propagates() {
        let (x, y) = step_data(20);
        let cv = CrossValidator::shuffle_split(3, 0.3).with_random_state(0);
        let configs = DecisionTreeConfig::depth_sweep([1, 0]);
        let err = validation_curve(&configs, &x, &y, &cv, Scoring::R2).unwrap_err();
        assert!(matches!(err, KolosalError::InvalidParameter { .. }));
    }

    #[test]
    fn test_validation_curve_unbounded_tree_fits_training_rows() {
        let (x, y) = step_data(30);
        let cv = CrossValidator::shuffle_split(4, 0.3).with_random_state(0);
        let scores =
            validation_curve(&[DecisionTreeConfig::default()], &x, &y, &cv, Scoring::R2).unwrap();
        assert!(scores.train_scores.as_array().iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_validation_curve_is_reproducible() {
        let (x, y) = step_data(30);
        let cv = CrossValidator::shuffle_split(4, 0.3).with_random_state(11);
        let configs = DecisionTreeConfig::depth_sweep(1..=3);
        let a = validation_curve(&configs, &x, &y, &cv, Scoring::R2).unwrap();
        let b = validation_curve(&configs, &x, &y, &cv, Scoring::R2).unwrap();
        assert_eq!(a.test_scores, b.test_scores);
        assert_eq!(a.train_scores.n_positions(), 3);
    }
}
