//! Confidence-Gated Boosted Tree Agent
//!
//! This library provides:
//! - A single-round regularized tree learner over logistic-loss statistics
//! - A symmetric confidence classifier on top of the tree margin
//! - Text feature extraction and mean imputation
//! - A deterministic escalation controller that answers, delegates to a
//!   specialist, or hands faults to error recovery
//!
//! # Example
//!
//! ```
//! use coordination::{AgentAction, AgentConfig, EscalationController};
//!
//! let mut agent = EscalationController::new(AgentConfig::default()).unwrap();
//!
//! // No training yet: the agent asks for data
//! let decision = agent.think("Will it rain tomorrow?");
//! assert!(matches!(decision.action, AgentAction::Delegate { .. }));
//!
//! agent.record_example("Is this spam? Buy now!!!", Some(1.0)).unwrap();
//! agent.record_example("Meeting moved to 3pm.", Some(0.0)).unwrap();
//! agent.train().unwrap();
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod boosting;
pub mod config;
pub mod error;
pub mod escalation;
pub mod features;

// Re-export tree and classifier types
pub use boosting::{
    Classification, ConfidenceClassifier, Label, RegularizedTree, SplitCandidate, TreeNode,
    TreeParams,
};

// Re-export feature pipeline types
pub use features::{FeatureExtractor, Imputer, TrainingHistory, FEATURE_COUNT, FEATURE_NAMES};

// Re-export escalation types
pub use escalation::{
    AgentAction, AgentDecision, AgentIdentity, AgentStatus, AttemptTracker, DelegateTarget,
    DelegationContext, DiagnosticEntry, EscalationController, Role, DATA_COLLECTION_ROLES,
    LOW_CONFIDENCE_CAVEAT, SPECIALIST_POOL,
};

pub use config::AgentConfig;
pub use error::{CoreError, CoreResult};
