//! Model selection: cross-validated score curves
//!
//! - [`learning_curve`] - scores against training-set size
//! - [`validation_curve`] - scores against a sequence of model configurations
//! - [`ScoreMatrix`] - `[position, fold]` scores and their mean/std reduction

mod curves;
mod scores;

pub use curves::{learning_curve, validation_curve, LearningCurveScores, ValidationCurveScores};
pub use scores::{CurveSummary, ScoreMatrix};
