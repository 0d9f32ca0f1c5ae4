//! Boosted Tree — single-round regularized tree for binary classification
//!
//! Fits one additive tree against the logistic-loss gradient of an all-zero
//! baseline and wraps it in a confidence classifier.
//!
//! ```text
//! labels ──► p = sigmoid(0) ──► g = p - y, h = p(1 - p)
//!                                   │
//!                                   ▼
//!                        RegularizedTree::build
//!                        (exact split search, gain - gamma)
//!                                   │
//!                                   ▼
//!        leaf weight = -eta · ΣG / (ΣH + lambda)
//!                                   │
//!                                   ▼
//!        margin ──► confidence = sigmoid(|margin|)
//! ```

pub mod classifier;
pub mod loss;
pub mod node;
pub mod tree;

pub use classifier::{Classification, ConfidenceClassifier, Label};
pub use node::TreeNode;
pub use tree::{RegularizedTree, SplitCandidate, TreeParams};
