//! Model training module
//!
//! Provides the regression tree and the cross-validation planner used by the
//! curve workflows, plus the [`Estimator`] seam they are driven through.

mod config;
mod models;
pub mod cross_validation;
pub mod decision_tree;

pub use config::DecisionTreeConfig;
pub use models::{r2_score, Estimator, EstimatorConfig, Scoring};
pub use cross_validation::{CrossValidator, CVSplit};
pub use decision_tree::{DecisionTree, TreeNode};
