//! Agent session
//!
//! Owns one [`EscalationController`] plus the handler table its delegations
//! are dispatched to.
//!
//! ```text
//! query ──► controller.think ──► AgentDecision
//!                                     │
//!                 ┌───────────────────┴──────────────┐
//!                 ▼                                  ▼
//!        HandlerTable::dispatch            telemetry JSONL (optional)
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use coordination::{AgentStatus, EscalationController, FEATURE_NAMES};
use tracing::{info, warn};

use crate::config::OrchestratorConfig;
use crate::dataset::{self, LabeledExample};
use crate::dispatch::HandlerTable;
use crate::telemetry::{self, DecisionRecord};

pub struct AgentSession {
    controller: EscalationController,
    handlers: HandlerTable,
    telemetry_path: Option<PathBuf>,
}

impl AgentSession {
    /// Build a session from config, loading and training on the configured
    /// training file if one is set.
    pub fn from_config(config: OrchestratorConfig) -> Result<Self> {
        let examples = match &config.training_path {
            Some(path) => dataset::load_examples(path)
                .with_context(|| format!("loading training data from {}", path.display()))?,
            None => Vec::new(),
        };
        Self::bootstrap(config, &examples)
    }

    /// Record `examples` and train if any of them carries a label.
    ///
    /// Examples whose text yields no features are skipped with a warning.
    pub fn bootstrap(config: OrchestratorConfig, examples: &[LabeledExample]) -> Result<Self> {
        let mut controller =
            EscalationController::new(config.agent).context("invalid agent configuration")?;

        let mut skipped = 0usize;
        for (line, example) in examples.iter().enumerate() {
            if let Err(e) = controller.record_example(&example.text, example.label) {
                warn!(example = line + 1, code = e.code(), "Skipping example: {e}");
                skipped += 1;
            }
        }

        if controller.history().labeled_count() > 0 {
            controller.train().context("training on labeled examples")?;
        }

        info!(
            agent = %controller.identity().name,
            examples = examples.len(),
            skipped,
            status = %controller.status(),
            "Session ready"
        );

        Ok(Self {
            controller,
            handlers: HandlerTable::with_defaults(),
            telemetry_path: config.telemetry_path,
        })
    }

    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn controller(&self) -> &EscalationController {
        &self.controller
    }

    pub fn status(&self) -> AgentStatus {
        self.controller.status()
    }

    /// Trained tree as JSON next to the names of the features its splits index.
    pub fn tree_report(&self) -> Option<serde_json::Value> {
        let root = self.controller.classifier().tree().root()?;
        Some(serde_json::json!({
            "features": FEATURE_NAMES,
            "tree": root,
        }))
    }

    /// Decide on `query`, dispatch any delegation and log the outcome.
    pub async fn ask(&mut self, query: &str) -> DecisionRecord {
        let decision = self.controller.think(query);
        let agent = self.controller.identity().name.clone();
        let reports = self.handlers.dispatch(&agent, query, &decision).await;

        let record = DecisionRecord {
            agent,
            query: query.to_string(),
            decision,
            reports,
        };
        info!("{}", record.summary());

        if let Some(path) = &self.telemetry_path {
            telemetry::append_decision(&record, path);
        }
        record
    }
}
