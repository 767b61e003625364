//! Model complexity: scores against maximum tree depth

use super::{read_json, write_json};
use crate::error::Result;
use crate::model_selection::{validation_curve, CurveSummary};
use crate::training::{CrossValidator, DecisionTreeConfig, Scoring};
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

/// Complexity-curve analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityCurveConfig {
    pub cv: CrossValidator,
    /// Depth sweep, plotted in this order
    pub depths: Vec<usize>,
    pub scoring: Scoring,
    pub figure: FigureConfig,
}

impl Default for ComplexityCurveConfig {
    fn default() -> Self {
        Self {
            cv: CrossValidator::shuffle_split(20, 0.3).with_random_state(0),
            depths: (1..=10).collect(),
            scoring: Scoring::R2,
            figure: FigureConfig::new("complexity_performance.svg", 700, 500),
        }
    }
}

impl ComplexityCurveConfig {
    /// Set the split plan
    pub fn with_cv(mut self, cv: CrossValidator) -> Self {
        self.cv = cv;
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

/// Scores summarised per depth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityCurve {
    pub depths: Vec<usize>,
    pub train: CurveSummary,
    pub test: CurveSummary,
}

impl ComplexityCurve {
    /// `(train_mean, test_mean)` per depth
    pub fn mean_pairs(&self) -> Vec<(f64, f64)> {
        self.train
            .mean
            .iter()
            .copied()
            .zip(self.test.mean.iter().copied())
            .collect()
    }
}

/// Sweeps tree depth and plots training against validation score
pub struct ComplexityAnalysis {
    config: ComplexityCurveConfig,
}

impl Default for ComplexityAnalysis {
    fn default() -> Self {
        Self::new(ComplexityCurveConfig::default())
    }
}

impl ComplexityAnalysis {
    pub fn new(config: ComplexityCurveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComplexityCurveConfig {
        &self.config
    }

    pub fn compute(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<ComplexityCurve> {
        let sweep = DecisionTreeConfig::depth_sweep(self.config.depths.iter().copied());
        let scores = validation_curve(&sweep, x, y, &self.config.cv, self.config.scoring)?;

        Ok(ComplexityCurve {
            depths: self.config.depths.clone(),
            train: scores.train_scores.summary(),
            test: scores.test_scores.summary(),
        })
    }

    /// Compute the curve and write the figure
    pub fn run(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let curve = self.compute(x, y)?;

        let figure = Figure::new(&self.config.figure)?;
        self.render(figure.area(), &curve)?;
        figure.present()?;

        info!(depths = curve.depths.len(), "Complexity performance figure complete");
        Ok(())
    }

    pub fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        curve: &ComplexityCurve,
    ) -> Result<()> {
        let x: Vec<f64> = curve.depths.iter().map(|&d| d as f64).collect();
        let lo = x.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let x_range = if lo.is_finite() { (lo - 0.5)..(hi + 0.5) } else { 0.0..1.0 };

        let panel = ScorePanel {
            title: "Decision Tree Regressor Complexity Performance".to_string(),
            x_label: "Maximum Depth",
            y_label: "Score",
            x_range,
            y_range: SCORE_RANGE,
            series: vec![
                ScoreSeries {
                    label: "Training Score",
                    color: TRAIN_COLOR,
                    x: x.clone(),
                    summary: &curve.train,
                },
                ScoreSeries {
                    label: "Validation Score",
                    color: TEST_COLOR,
                    x,
                    summary: &curve.test,
                },
            ],
            legend: Some(LegendPosition::LowerRight),
        };
        draw_score_panel(area, &panel)
    }
}
