//! Kolosal Diagnostics - learning and complexity curves for tree regressors
//!
//! This crate provides the model-evaluation plots used when tuning a
//! decision-tree regressor:
//! - Learning curves: score against training-set size for several depths
//! - Complexity curves: score against maximum depth
//! - Feature scatter plots with a least-squares line for exploratory analysis
//!
//! # Modules
//!
//! - [`analysis`] - The three plotting workflows
//! - [`model_selection`] - Cross-validated learning and validation curves
//! - [`training`] - Regression tree, split planner and scoring
//! - [`visualization`] - Figures and panels rendered with `plotters`
//! - [`utils`] - Numeric helpers (schedules, reductions, linear fit)

// Core error handling
pub mod error;

// Models and evaluation
pub mod training;
pub mod model_selection;

// Rendering and workflows
pub mod visualization;
pub mod analysis;

// Utilities
pub mod utils;

pub use error::{KolosalError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{KolosalError, Result};

    // Workflows
    pub use crate::analysis::{
        plot_with_regression_line, scatter_panels, ComplexityAnalysis, ComplexityCurveConfig,
        LearningAnalysis, LearningCurveConfig,
    };

    // Evaluation
    pub use crate::model_selection::{learning_curve, validation_curve, CurveSummary, ScoreMatrix};
    pub use crate::training::{CrossValidator, DecisionTree, DecisionTreeConfig, Scoring};

    // Rendering
    pub use crate::visualization::{Figure, FigureConfig};
}
