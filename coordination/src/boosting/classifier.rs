//! Confidence Classifier — turns a tree margin into a symmetric confidence
//!
//! Training uses the signed logistic `sigmoid(margin)`, while confidence uses
//! `sigmoid(|margin|)`. The two are deliberately different: confidence measures
//! how far the margin is from the decision boundary, regardless of which class
//! it points to, so it always lies in `[0.5, 1)`.

use serde::{Deserialize, Serialize};

use super::loss::sigmoid;
use super::tree::{RegularizedTree, TreeParams};
use crate::error::CoreResult;

/// Predicted class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// `Positive` only for a strictly positive margin.
    pub fn from_margin(margin: f64) -> Self {
        if margin > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
        }
    }
}

/// Outcome of classifying one feature vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Raw additive tree output
    pub margin: f64,
    /// `sigmoid(|margin|)`
    pub confidence: f64,
    pub label: Label,
}

impl Classification {
    pub fn from_margin(margin: f64) -> Self {
        Self {
            margin,
            confidence: confidence_for_margin(margin),
            label: Label::from_margin(margin),
        }
    }
}

/// Symmetric confidence of a margin.
pub fn confidence_for_margin(margin: f64) -> f64 {
    sigmoid(margin.abs())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfidenceClassifier {
    tree: RegularizedTree,
}

impl ConfidenceClassifier {
    pub fn new(params: TreeParams) -> Self {
        Self {
            tree: RegularizedTree::new(params),
        }
    }

    pub fn tree(&self) -> &RegularizedTree {
        &self.tree
    }

    pub fn is_trained(&self) -> bool {
        self.tree.is_trained()
    }

    pub fn train(&mut self, features: &[Vec<f64>], labels: &[f64]) -> CoreResult<()> {
        self.tree.train(features, labels)
    }

    pub fn classify(&self, features: &[f64]) -> CoreResult<Classification> {
        let margin = self.tree.predict(features)?;
        Ok(Classification::from_margin(margin))
    }
}
