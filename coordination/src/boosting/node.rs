//! Tree nodes
//!
//! A node is either a leaf carrying a prediction or a split owning exactly two
//! children. Children are boxed and owned by their parent only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        /// Shrunk, regularized leaf weight
        prediction: f64,
        /// Training rows routed to this leaf
        samples: usize,
    },
    Split {
        feature: usize,
        /// Rows with `x[feature] <= threshold` go left
        threshold: f64,
        gain: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(prediction: f64, samples: usize) -> Self {
        Self::Leaf {
            prediction,
            samples,
        }
    }

    pub fn split(
        feature: usize,
        threshold: f64,
        gain: f64,
        left: TreeNode,
        right: TreeNode,
    ) -> Self {
        Self::Split {
            feature,
            threshold,
            gain,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    pub fn split_feature(&self) -> Option<usize> {
        match self {
            Self::Split { feature, .. } => Some(*feature),
            Self::Leaf { .. } => None,
        }
    }

    pub fn split_value(&self) -> Option<f64> {
        match self {
            Self::Split { threshold, .. } => Some(*threshold),
            Self::Leaf { .. } => None,
        }
    }

    pub fn prediction(&self) -> Option<f64> {
        match self {
            Self::Leaf { prediction, .. } => Some(*prediction),
            Self::Split { .. } => None,
        }
    }

    /// Split gain; leaves report 0.
    pub fn gain(&self) -> f64 {
        match self {
            Self::Split { gain, .. } => *gain,
            Self::Leaf { .. } => 0.0,
        }
    }

    pub fn left_child(&self) -> Option<&TreeNode> {
        match self {
            Self::Split { left, .. } => Some(left.as_ref()),
            Self::Leaf { .. } => None,
        }
    }

    pub fn right_child(&self) -> Option<&TreeNode> {
        match self {
            Self::Split { right, .. } => Some(right.as_ref()),
            Self::Leaf { .. } => None,
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn internal_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split { left, right, .. } => 1 + left.internal_count() + right.internal_count(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a TreeNode>) {
        match self {
            Self::Leaf { .. } => out.push(self),
            Self::Split { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }
}
