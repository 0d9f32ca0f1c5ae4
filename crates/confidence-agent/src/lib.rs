//! Orchestrator for the confidence-gated boosted-tree agent
//!
//! Owns everything the core leaves to its caller: loading configuration and
//! training data, triggering training, invoking the roles the controller
//! delegates to, and recording every decision.

pub mod config;
pub mod dataset;
pub mod dispatch;
pub mod session;
pub mod telemetry;
