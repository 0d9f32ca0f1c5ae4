//! Escalation — Deterministic confidence-gated delegation
//!
//! Decides, for each query, whether the agent answers directly or hands the
//! query to another role. This is a pure state machine with no I/O; the
//! orchestrator performs every delegation it emits.
//!
//! # Escalation Ladder
//!
//! ```text
//! Untrained
//!     │  every query is recorded as an unlabeled sample
//!     └─► Data Collector + Knowledge Expert
//!
//! Trained, confidence >= threshold (default 0.7)
//!     └─► Answer
//!
//! Trained, confidence < threshold
//!     │  one specialist per call, never repeated
//!     ├─► Detail Analyzer
//!     ├─► Pattern Recognizer
//!     ├─► Context Explorer
//!     ├─► Alternative Perspective
//!     ├─► Solution Synthesizer
//!     │
//!     ▼
//! Pool exhausted → Answer with low-confidence caveat
//! ```

pub mod action;
pub mod controller;
pub mod roles;
pub mod state;

pub use action::{
    AgentAction, AgentDecision, DelegateTarget, DelegationContext, LOW_CONFIDENCE_CAVEAT,
};
pub use controller::{DiagnosticEntry, EscalationController};
pub use roles::{Role, DATA_COLLECTION_ROLES, SPECIALIST_POOL};
pub use state::{AgentIdentity, AgentStatus, AttemptTracker};
