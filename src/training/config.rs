//! Estimator configuration

use super::decision_tree::DecisionTree;
use super::models::EstimatorConfig;
use crate::error::{KolosalError, Result};
use serde::{Deserialize, Serialize};

/// Hyperparameters of a regression tree.
///
/// Sweeps over model complexity are expressed as a sequence of these values,
/// one fully specified configuration per point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTreeConfig {
    /// Maximum depth of the tree (None = grow until leaves are pure)
    pub max_depth: Option<usize>,

    /// Minimum samples required to split an internal node
    pub min_samples_split: usize,

    /// Minimum samples per leaf
    pub min_samples_leaf: usize,
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl DecisionTreeConfig {
    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set minimum samples to split
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    /// Set minimum samples in leaf
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples;
        self
    }

    /// One configuration per depth, in the order given
    pub fn depth_sweep(depths: impl IntoIterator<Item = usize>) -> Vec<Self> {
        depths
            .into_iter()
            .map(|d| Self::default().with_max_depth(d))
            .collect()
    }

    /// Check hyperparameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(KolosalError::InvalidParameter {
                name: "max_depth".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_samples_split < 2 {
            return Err(KolosalError::InvalidParameter {
                name: "min_samples_split".to_string(),
                value: self.min_samples_split.to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        if self.min_samples_leaf < 1 {
            return Err(KolosalError::InvalidParameter {
                name: "min_samples_leaf".to_string(),
                value: self.min_samples_leaf.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl EstimatorConfig for DecisionTreeConfig {
    type Estimator = DecisionTree;

    fn build(&self) -> DecisionTree {
        DecisionTree::new(self.clone())
    }

    fn describe(&self) -> String {
        match self.max_depth {
            Some(d) => format!("max_depth = {}", d),
            None => "max_depth = None".to_string(),
        }
    }
}
