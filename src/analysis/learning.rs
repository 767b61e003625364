//! Learning performance of regression trees of increasing depth

use super::{read_json, write_json};
use crate::error::{KolosalError, Result};
use crate::model_selection::{learning_curve, CurveSummary};
use crate::training::{CrossValidator, DecisionTreeConfig, Scoring};
use crate::utils::stats::training_size_schedule;
use crate::visualization::{
    draw_score_panel, Figure, FigureConfig, LegendPosition, ScorePanel, ScoreSeries, SCORE_RANGE,
    TEST_COLOR, TRAIN_COLOR,
};
use ndarray::{Array1, Array2};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Learning-curve analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningCurveConfig {
    /// Split plan shared by every depth and every training size
    pub cv: CrossValidator,
    /// Number of points in the training-size schedule
    pub n_sizes: usize,
    /// One panel per depth
    pub depths: Vec<usize>,
    pub scoring: Scoring,
    pub figure: FigureConfig,
}

impl Default for LearningCurveConfig {
    fn default() -> Self {
        Self {
            cv: CrossValidator::shuffle_split(20, 0.3).with_random_state(0),
            n_sizes: 9,
            depths: vec![3, 6, 10, 15, 20, 25],
            scoring: Scoring::R2,
            figure: FigureConfig::new("learning_performances.svg", 1000, 700),
        }
    }
}

impl LearningCurveConfig {
    /// Set the split plan
    pub fn with_cv(mut self, cv: CrossValidator) -> Self {
        self.cv = cv;
        self
    }

    /// Set the depths, one panel each
    pub fn with_depths(mut self, depths: Vec<usize>) -> Self {
        self.depths = depths;
        self
    }

    /// Set the figure destination
    pub fn with_figure(mut self, figure: FigureConfig) -> Self {
        self.figure = figure;
        self
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }
}

/// Learning curve of one tree depth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningCurve {
    pub max_depth: usize,
    pub sizes: Vec<usize>,
    pub train: CurveSummary,
    pub test: CurveSummary,
}

/// Trains trees of several depths on growing training sets and plots the
/// training and testing scores, one panel per depth.
pub struct LearningAnalysis {
    config: LearningCurveConfig,
}

impl Default for LearningAnalysis {
    fn default() -> Self {
        Self::new(LearningCurveConfig::default())
    }
}

impl LearningAnalysis {
    pub fn new(config: LearningCurveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LearningCurveConfig {
        &self.config
    }

    /// Compute one summarised learning curve per configured depth
    pub fn compute(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Vec<LearningCurve>> {
        let sizes = training_size_schedule(x.nrows(), self.config.n_sizes)?;

        self.config
            .depths
            .iter()
            .map(|&depth| {
                let tree = DecisionTreeConfig::default().with_max_depth(depth);
                let scores = learning_curve(&tree, x, y, &self.config.cv, &sizes, self.config.scoring)?;
                Ok(LearningCurve {
                    max_depth: depth,
                    sizes: scores.sizes,
                    train: scores.train_scores.summary(),
                    test: scores.test_scores.summary(),
                })
            })
            .collect()
    }

    /// Compute the curves and write the figure
    pub fn run(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let curves = self.compute(x, y)?;

        let figure = Figure::new(&self.config.figure)?;
        self.render(figure.area(), x.nrows(), &curves)?;
        figure.present()?;

        info!(panels = curves.len(), n_samples = x.nrows(), "Learning performance figure complete");
        Ok(())
    }

    /// Lay the curves out on a grid of at most three columns under a shared
    /// title. The legend goes on the last panel.
    pub fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        n_samples: usize,
        curves: &[LearningCurve],
    ) -> Result<()> {
        if curves.is_empty() {
            return Err(KolosalError::ValidationError(
                "no learning curves to render".to_string(),
            ));
        }

        let cols = curves.len().min(3);
        let rows = curves.len().div_ceil(cols);

        let body = area.titled(
            "Decision Tree Regressor Learning Performances",
            ("sans-serif", 24),
        )?;
        let panels = body.split_evenly((rows, cols));
        let x_range = 0.0..n_samples as f64 * 0.8;

        for (k, (curve, panel_area)) in curves.iter().zip(panels.iter()).enumerate() {
            let x: Vec<f64> = curve.sizes.iter().map(|&s| s as f64).collect();
            let panel = ScorePanel {
                title: format!("max_depth = {}", curve.max_depth),
                x_label: "Number of Training Points",
                y_label: "Score",
                x_range: x_range.clone(),
                y_range: SCORE_RANGE,
                series: vec![
                    ScoreSeries {
                        label: "Training Score",
                        color: TRAIN_COLOR,
                        x: x.clone(),
                        summary: &curve.train,
                    },
                    ScoreSeries {
                        label: "Testing Score",
                        color: TEST_COLOR,
                        x,
                        summary: &curve.test,
                    },
                ],
                legend: (k + 1 == curves.len()).then_some(LegendPosition::LowerRight),
            };
            draw_score_panel(panel_area, &panel)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn linear_data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array::from_shape_fn((n, 2), |(i, j)| (i * (j + 1)) as f64);
        let y = Array::from_shape_fn(n, |i| 2.0 * i as f64 + 1.0);
        (x, y)
    }

    #[test]
    fn test_default_policy() {
        let config = LearningCurveConfig::default();
        assert_eq!(config.depths, vec![3, 6, 10, 15, 20, 25]);
        assert_eq!(config.n_sizes, 9);
        assert_eq!(config.cv.n_splits(), 20);
        assert_eq!((config.figure.width, config.figure.height), (1000, 700));
    }

    #[test]
    fn test_compute_small_dataset() {
        let (x, y) = linear_data(30);
        let config = LearningCurveConfig::default()
            .with_cv(CrossValidator::shuffle_split(4, 0.3).with_random_state(0))
            .with_depths(vec![1, 3]);
        let curves = LearningAnalysis::new(config).compute(&x, &y).unwrap();

        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].max_depth, 1);
        for curve in &curves {
            assert_eq!(curve.sizes.first(), Some(&1));
            assert_eq!(curve.train.len(), curve.sizes.len());
            assert_eq!(curve.test.len(), curve.sizes.len());
            // R² on a single training row is undefined
            assert!(curve.train.mean[0].is_nan());
        }
    }

    #[test]
    fn test_failed_compute_writes_no_figure() {
        let dir = tempfile::tempdir().unwrap();
        let (x, _) = linear_data(30);
        let y = Array1::zeros(29);
        let config = LearningCurveConfig::default()
            .with_figure(FigureConfig::new(dir.path().join("lc.svg"), 400, 300));

        assert!(LearningAnalysis::new(config.clone()).run(&x, &y).is_err());
        assert!(!config.figure.output_path.exists());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning.json");
        let config = LearningCurveConfig::default().with_depths(vec![2, 4]);
        config.save(&path).unwrap();

        let loaded = LearningCurveConfig::load(&path).unwrap();
        assert_eq!(loaded.depths, vec![2, 4]);
        assert_eq!(loaded.cv, config.cv);
    }
}
