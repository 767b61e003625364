//! Analysis workflows
//!
//! - [`LearningAnalysis`] - learning curves for a family of tree depths
//! - [`ComplexityAnalysis`] - validation curve over tree depth
//! - [`plot_with_regression_line`] - feature-vs-target scatter plots

pub mod complexity;
pub mod learning;
pub mod scatter;

pub use complexity::{ComplexityAnalysis, ComplexityCurve, ComplexityCurveConfig};
pub use learning::{LearningAnalysis, LearningCurve, LearningCurveConfig};
pub use scatter::{plot_with_regression_line, scatter_figure_config, scatter_panels};

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
