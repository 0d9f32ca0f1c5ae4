//! Regularized Tree — exact greedy split search over logistic-loss statistics
//!
//! Training is a single boosting round: every sample starts from a raw score of
//! 0, so the tree is the additive correction to a constant 0.5 probability.
//! There is no ensemble, no subsampling and no multi-class support.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::loss::{leaf_weight, region_score, GradientPair};
use super::node::TreeNode;
use crate::error::{CoreError, CoreResult};

/// Tree hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    /// Maximum number of edges from root to leaf
    pub max_depth: usize,
    /// Minimum hessian sum on each side of a split
    pub min_child_weight: f64,
    /// Minimum gain required to accept a split
    pub gamma: f64,
    /// L2 regularizer on leaf weights
    pub lambda: f64,
    /// Shrinkage applied to leaf weights
    pub eta: f64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 6,
            min_child_weight: 1.0,
            gamma: 0.1,
            lambda: 1.0,
            eta: 0.3,
        }
    }
}

impl TreeParams {
    pub fn validate(&self) -> CoreResult<()> {
        let non_negative = [
            ("min_child_weight", self.min_child_weight),
            ("gamma", self.gamma),
            ("lambda", self.lambda),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "{} must be a finite value >= 0, got {}",
                    name, value
                )));
            }
        }
        if !(self.eta > 0.0 && self.eta <= 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "eta must be in (0, 1], got {}",
                self.eta
            )));
        }
        Ok(())
    }
}

/// Winning split of a region, with the statistics of both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitCandidate {
    pub feature: usize,
    pub threshold: f64,
    pub gain: f64,
    pub left_gradient: f64,
    pub left_hessian: f64,
    pub right_gradient: f64,
    pub right_hessian: f64,
}

/// Per-sample statistics borrowed during a build.
struct GradientTable<'a> {
    features: &'a [Vec<f64>],
    gradients: Vec<f64>,
    hessians: Vec<f64>,
}

impl GradientTable<'_> {
    fn sums(&self, indices: &[usize]) -> (f64, f64) {
        indices.iter().fold((0.0, 0.0), |(g, h), &i| {
            (g + self.gradients[i], h + self.hessians[i])
        })
    }
}

/// Single regularized tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegularizedTree {
    params: TreeParams,
    root: Option<TreeNode>,
}

impl RegularizedTree {
    pub fn new(params: TreeParams) -> Self {
        Self { params, root: None }
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.root.is_some()
    }

    /// Fit the tree against labels in {0, 1}.
    ///
    /// Replaces any previously trained root.
    pub fn train(&mut self, features: &[Vec<f64>], labels: &[f64]) -> CoreResult<()> {
        validate_dataset(features, labels)?;

        let (gradients, hessians): (Vec<f64>, Vec<f64>) = labels
            .iter()
            .map(|&label| {
                let pair = GradientPair::logistic(label, 0.0);
                (pair.gradient, pair.hessian)
            })
            .unzip();

        let table = GradientTable {
            features,
            gradients,
            hessians,
        };
        let indices: Vec<usize> = (0..features.len()).collect();
        let root = self.build_tree(&table, &indices, 0);

        info!(
            samples = features.len(),
            width = features[0].len(),
            internal_nodes = root.internal_count(),
            leaves = root.leaf_count(),
            depth = root.depth(),
            "Tree trained"
        );
        self.root = Some(root);
        Ok(())
    }

    fn build_tree(&self, table: &GradientTable<'_>, indices: &[usize], depth: usize) -> TreeNode {
        if depth >= self.params.max_depth {
            return self.make_leaf(table, indices);
        }

        let split = match self.find_best_split(table, indices) {
            Some(split) if split.gain > 0.0 => split,
            _ => return self.make_leaf(table, indices),
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| table.features[i][split.feature] <= split.threshold);

        debug!(
            depth,
            feature = split.feature,
            threshold = split.threshold,
            gain = split.gain,
            left = left.len(),
            right = right.len(),
            "Accepted split"
        );

        TreeNode::split(
            split.feature,
            split.threshold,
            split.gain,
            self.build_tree(table, &left, depth + 1),
            self.build_tree(table, &right, depth + 1),
        )
    }

    fn make_leaf(&self, table: &GradientTable<'_>, indices: &[usize]) -> TreeNode {
        let (g, h) = table.sums(indices);
        TreeNode::leaf(
            leaf_weight(g, h, self.params.lambda, self.params.eta),
            indices.len(),
        )
    }

    /// Exact split search over the rows in `indices`.
    ///
    /// Each candidate threshold is evaluated with its own scan of the region.
    /// Only a strictly greater gain replaces the current best, so ties resolve
    /// to the lowest feature index and then the lowest threshold.
    fn find_best_split(
        &self,
        table: &GradientTable<'_>,
        indices: &[usize],
    ) -> Option<SplitCandidate> {
        let width = indices
            .first()
            .map(|&i| table.features[i].len())
            .unwrap_or(0);
        let (total_g, total_h) = table.sums(indices);
        let parent_score = region_score(total_g, total_h, self.params.lambda);

        let mut best_gain = 0.0;
        let mut best: Option<SplitCandidate> = None;

        for feature in 0..width {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| table.features[i][feature])
                .collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            for pair in values.windows(2) {
                let threshold = midpoint(pair[0], pair[1]);

                let (mut left_g, mut left_h) = (0.0, 0.0);
                for &i in indices {
                    if table.features[i][feature] <= threshold {
                        left_g += table.gradients[i];
                        left_h += table.hessians[i];
                    }
                }
                let right_g = total_g - left_g;
                let right_h = total_h - left_h;

                if left_h < self.params.min_child_weight || right_h < self.params.min_child_weight
                {
                    continue;
                }

                let gain = (region_score(left_g, left_h, self.params.lambda)
                    + region_score(right_g, right_h, self.params.lambda)
                    - parent_score)
                    / 2.0
                    - self.params.gamma;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        gain,
                        left_gradient: left_g,
                        left_hessian: left_h,
                        right_gradient: right_g,
                        right_hessian: right_h,
                    });
                }
            }
        }

        best
    }

    /// Raw additive margin for one feature vector.
    pub fn predict(&self, features: &[f64]) -> CoreResult<f64> {
        let mut node = self.root.as_ref().ok_or(CoreError::ModelNotTrained)?;
        loop {
            match node {
                TreeNode::Leaf { prediction, .. } => return Ok(*prediction),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    let value =
                        features
                            .get(*feature)
                            .ok_or(CoreError::FeatureIndexOutOfRange {
                                index: *feature,
                                width: features.len(),
                            })?;
                    node = if *value <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }
}

fn validate_dataset(features: &[Vec<f64>], labels: &[f64]) -> CoreResult<()> {
    if features.is_empty() || labels.is_empty() {
        return Err(CoreError::EmptyDataset);
    }
    if features.len() != labels.len() {
        return Err(CoreError::LengthMismatch {
            features: features.len(),
            labels: labels.len(),
        });
    }

    let expected = features[0].len();
    for (row, (values, &label)) in features.iter().zip(labels).enumerate() {
        if values.len() != expected {
            return Err(CoreError::RaggedFeatures {
                row,
                width: values.len(),
                expected,
            });
        }
        if let Some(feature) = values.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::NonFiniteFeature { row, feature });
        }
        if label != 0.0 && label != 1.0 {
            return Err(CoreError::InvalidLabel { row, value: label });
        }
    }
    Ok(())
}

/// Midpoint of two finite values with `a < b`, never overflowing.
///
/// Falls back to `a` when rounding would land the midpoint on `b`, so the
/// candidate still separates the two values.
fn midpoint(a: f64, b: f64) -> f64 {
    let mid = a / 2.0 + b / 2.0;
    if mid < b {
        mid
    } else {
        a
    }
}
