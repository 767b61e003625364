//! CART regression tree
//!
//! Greedy binary splits on the mean-squared-error criterion. Leaves predict
//! the mean target of the samples that reach them.

use super::config::DecisionTreeConfig;
use super::models::Estimator;
use crate::error::{KolosalError, Result};
use ndarray::{Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Regression tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node with prediction value
    Leaf { value: f64 },
    /// Internal node with split
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Decision tree regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<TreeNode>,
    config: DecisionTreeConfig,
    n_features: usize,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new(DecisionTreeConfig::default())
    }
}

/// Running sums used to score a candidate split without re-reading the targets.
///
/// Values are accumulated relative to `shift`, a target from the same node,
/// so large targets with a small spread keep their precision.
#[derive(Debug, Clone, Copy)]
struct Moments {
    shift: f64,
    count: usize,
    sum: f64,
    sq_sum: f64,
}

impl Moments {
    fn new(shift: f64) -> Self {
        Self {
            shift,
            count: 0,
            sum: 0.0,
            sq_sum: 0.0,
        }
    }

    fn push(&mut self, v: f64) {
        let d = v - self.shift;
        self.count += 1;
        self.sum += d;
        self.sq_sum += d * d;
    }

    fn pop(&mut self, v: f64) {
        let d = v - self.shift;
        self.count -= 1;
        self.sum -= d;
        self.sq_sum -= d * d;
    }

    fn mean(&self) -> f64 {
        self.shift + self.sum / self.count as f64
    }

    /// Var = E[D²] - E[D]², D = X - shift
    fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        (self.sq_sum / n - (self.sum / n).powi(2)).max(0.0)
    }
}

impl DecisionTree {
    /// Create an unfitted tree from a configuration
    pub fn new(config: DecisionTreeConfig) -> Self {
        Self {
            root: None,
            config,
            n_features: 0,
        }
    }

    /// Configuration this tree was built with
    pub fn config(&self) -> &DecisionTreeConfig {
        &self.config
    }

    /// Fit the tree to training data
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(KolosalError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(KolosalError::ValidationError(
                "Cannot fit a decision tree on zero samples".to_string(),
            ));
        }
        self.config.validate()?;

        self.n_features = n_features;
        let indices: Vec<usize> = (0..n_samples).collect();
        self.root = Some(self.build_tree(x, y, &indices, 0));

        Ok(self)
    }

    fn build_tree(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        depth: usize,
    ) -> TreeNode {
        let n_samples = indices.len();
        let shift = y[indices[0]];
        let mut node_moments = Moments::new(shift);
        for &i in indices {
            node_moments.push(y[i]);
        }
        let leaf_value = node_moments.mean();
        let impurity = node_moments.variance();

        let should_stop = n_samples < self.config.min_samples_split
            || n_samples < 2 * self.config.min_samples_leaf
            || self.config.max_depth.map_or(false, |d| depth >= d)
            || impurity <= f64::EPSILON;

        if should_stop {
            return TreeNode::Leaf { value: leaf_value };
        }

        let Some((feature_idx, threshold)) = self.find_best_split(x, y, indices, shift, impurity) else {
            return TreeNode::Leaf { value: leaf_value };
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| x[[i, feature_idx]] <= threshold);

        let left = Box::new(self.build_tree(x, y, &left_indices, depth + 1));
        let right = Box::new(self.build_tree(x, y, &right_indices, depth + 1));

        TreeNode::Split {
            feature_idx,
            threshold,
            left,
            right,
        }
    }

    /// Best (feature, threshold) by impurity decrease over all features.
    ///
    /// Each feature is scanned independently on the rayon pool: samples are
    /// sorted by the feature value and moved one by one from the right
    /// partition to the left, so every candidate threshold costs O(1).
    fn find_best_split(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        shift: f64,
        parent_impurity: f64,
    ) -> Option<(usize, f64)> {
        let n = indices.len() as f64;
        let min_leaf = self.config.min_samples_leaf;

        let feature_results: Vec<Option<(usize, f64, f64)>> = (0..x.ncols())
            .into_par_iter()
            .map(|feature_idx| {
                let mut order: Vec<(f64, f64)> = indices
                    .iter()
                    .map(|&i| (x[[i, feature_idx]], y[i]))
                    .collect();
                order.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

                let mut left = Moments::new(shift);
                let mut right = Moments::new(shift);
                for &(_, yi) in &order {
                    right.push(yi);
                }

                let mut best: Option<(f64, f64)> = None;
                for w in 0..order.len() - 1 {
                    let (xv, yv) = order[w];
                    left.push(yv);
                    right.pop(yv);

                    let next = order[w + 1].0;
                    if next <= xv {
                        continue;
                    }
                    if left.count < min_leaf || right.count < min_leaf {
                        continue;
                    }

                    let weighted = (left.count as f64 * left.variance()
                        + right.count as f64 * right.variance())
                        / n;
                    let gain = parent_impurity - weighted;
                    if gain > best.map_or(0.0, |(_, g)| g) {
                        best = Some(((xv + next) / 2.0, gain));
                    }
                }

                best.map(|(threshold, gain)| (feature_idx, threshold, gain))
            })
            .collect();

        // First feature wins ties so that fits are reproducible
        feature_results
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<(usize, f64, f64)>, cand| match acc {
                Some(best) if best.2 >= cand.2 => Some(best),
                _ => Some(cand),
            })
            .map(|(feature_idx, threshold, _)| (feature_idx, threshold))
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let root = self.root.as_ref().ok_or(KolosalError::ModelNotFitted)?;

        if x.ncols() != self.n_features {
            return Err(KolosalError::ShapeError {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", x.ncols()),
            });
        }

        Ok(x.rows()
            .into_iter()
            .map(|row| {
                let mut node = root;
                loop {
                    match node {
                        TreeNode::Leaf { value, .. } => break *value,
                        TreeNode::Split { feature_idx, threshold, left, right, .. } => {
                            node = if row[*feature_idx] <= *threshold { &**left } else { &**right };
                        }
                    }
                }
            })
            .collect())
    }

    /// Depth of the fitted tree; a single leaf has depth 0
    pub fn get_depth(&self) -> usize {
        fn depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        self.root.as_ref().map_or(0, depth)
    }

    /// Get number of leaves
    pub fn get_n_leaves(&self) -> usize {
        fn leaves(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => leaves(left) + leaves(right),
            }
        }
        self.root.as_ref().map_or(0, leaves)
    }
}

impl Estimator for DecisionTree {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        DecisionTree::fit(self, x, y).map(|_| ())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        DecisionTree::predict(self, x)
    }
}
