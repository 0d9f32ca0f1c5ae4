//! Escalation Controller — confidence-gated decision state machine
//!
//! Consumes a query, runs it through extraction, imputation and the
//! classifier, and decides what the orchestrator should do next. All decisions
//! are deterministic; the controller never invokes a delegate itself.
//!
//! ```text
//! Untrained ──► record sample ──► Delegate{Data Collector, Knowledge Expert}
//!
//! Trained ──► confidence >= threshold ──► Answer
//!         └─► confidence <  threshold ──► next specialist available?
//!                                          ├─ yes ──► Delegate{specialist, context}
//!                                          └─ no  ──► Answer + caveat
//!
//! any fault ──► Delegate{Error Recovery Specialist}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::action::{AgentAction, AgentDecision, DelegationContext, LOW_CONFIDENCE_CAVEAT};
use super::roles::{Role, DATA_COLLECTION_ROLES};
use super::state::{AgentIdentity, AgentStatus, AttemptTracker};
use crate::boosting::ConfidenceClassifier;
use crate::config::AgentConfig;
use crate::error::{CoreError, CoreResult};
use crate::features::{FeatureExtractor, Imputer, TrainingHistory};

const EXHAUSTED_NOTE: &str =
    "All specialized approaches attempted. Providing best available answer with low confidence.";

/// A fault caught while computing a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub code: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

pub struct EscalationController {
    identity: AgentIdentity,
    config: AgentConfig,
    classifier: ConfidenceClassifier,
    history: TrainingHistory,
    attempts: AttemptTracker,
    status: AgentStatus,
    diagnostics: Vec<DiagnosticEntry>,
}

impl EscalationController {
    pub fn new(config: AgentConfig) -> CoreResult<Self> {
        let identity = AgentIdentity::new(config.name.clone());
        Self::with_identity(identity, config)
    }

    pub fn with_identity(identity: AgentIdentity, config: AgentConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            identity,
            classifier: ConfidenceClassifier::new(config.tree),
            config,
            history: TrainingHistory::new(),
            attempts: AttemptTracker::new(),
            status: AgentStatus::Untrained,
            diagnostics: Vec::new(),
        })
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn classifier(&self) -> &ConfidenceClassifier {
        &self.classifier
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn attempts(&self) -> &AttemptTracker {
        &self.attempts
    }

    /// Every fault caught so far, oldest first
    pub fn diagnostics(&self) -> &[DiagnosticEntry] {
        &self.diagnostics
    }

    /// Record an externally supplied sample; returns its history index.
    pub fn add_data_point(&mut self, features: Vec<Option<f64>>, label: Option<f64>) -> usize {
        self.history.push(features, label)
    }

    /// Extract features from `text` and record them with `label`.
    pub fn record_example(&mut self, text: &str, label: Option<f64>) -> CoreResult<usize> {
        let features = FeatureExtractor::extract(text)?;
        Ok(self.history.push(Imputer::observed(&features), label))
    }

    /// Attach a label to a sample recorded earlier, e.g. on the untrained path.
    pub fn label_sample(&mut self, index: usize, label: f64) -> CoreResult<()> {
        self.history.set_label(index, label)
    }

    /// Fit the classifier on the labeled part of the history.
    ///
    /// Unlabeled rows are skipped and missing values are imputed from the
    /// whole history. Moves the controller to `Trained` on success.
    pub fn train(&mut self) -> CoreResult<()> {
        let (features, labels): (Vec<Vec<f64>>, Vec<f64>) = self
            .history
            .labeled()
            .map(|(row, label)| (Imputer::impute(row, &self.history), label))
            .unzip();
        if features.is_empty() {
            return Err(CoreError::EmptyDataset);
        }

        self.classifier.train(&features, &labels)?;
        self.status = AgentStatus::Trained;
        info!(
            agent = %self.identity.name,
            labeled = labels.len(),
            recorded = self.history.len(),
            "Agent trained"
        );
        Ok(())
    }

    /// Decide what to do with a text query. Never fails: faults become an
    /// error-recovery delegation.
    pub fn think(&mut self, input: &str) -> AgentDecision {
        let mut thinking = vec!["Analyzing input using the boosted tree model...".to_string()];
        let outcome = FeatureExtractor::extract(input)
            .and_then(|features| self.decide(&Imputer::observed(&features), &mut thinking));
        self.conclude(outcome, thinking)
    }

    /// Like [`think`](Self::think) for a pre-extracted, possibly partial vector.
    pub fn think_features(&mut self, features: &[Option<f64>]) -> AgentDecision {
        let mut thinking =
            vec!["Analyzing feature vector using the boosted tree model...".to_string()];
        let outcome = self.decide(features, &mut thinking);
        self.conclude(outcome, thinking)
    }

    fn decide(
        &mut self,
        raw: &[Option<f64>],
        thinking: &mut Vec<String>,
    ) -> CoreResult<AgentAction> {
        let features = Imputer::impute(raw, &self.history);

        if self.status == AgentStatus::Untrained {
            let index = self.history.push(Imputer::observed(&features), None);
            thinking.push("Insufficient training data. Initiating data collection...".to_string());
            debug!(agent = %self.identity.name, sample = index, "Recorded unlabeled sample");
            return Ok(AgentAction::delegate(DATA_COLLECTION_ROLES, None));
        }

        let classification = self.classifier.classify(&features)?;
        let confidence = classification.confidence;
        thinking.push(format!("Confidence level: {:.1}%", confidence * 100.0));

        if confidence >= self.config.confidence_threshold {
            info!(
                agent = %self.identity.name,
                label = %classification.label,
                confidence,
                "Answering directly"
            );
            return Ok(AgentAction::answer(&classification, None));
        }

        match self.attempts.next_available_role() {
            Some(role) => {
                self.attempts.record_attempt(role);
                thinking.push(format!(
                    "Confidence too low ({:.1}%). Delegating to {}.",
                    confidence * 100.0,
                    role
                ));
                info!(
                    agent = %self.identity.name,
                    role = %role,
                    confidence,
                    attempted = self.attempts.attempted().len(),
                    "Escalating to specialist"
                );
                Ok(AgentAction::delegate(
                    [role],
                    Some(DelegationContext {
                        previous_confidence: confidence,
                        attempted_approaches: self.attempts.attempted().to_vec(),
                    }),
                ))
            }
            None => {
                thinking.push(EXHAUSTED_NOTE.to_string());
                warn!(
                    agent = %self.identity.name,
                    confidence,
                    "Specialist pool exhausted"
                );
                Ok(AgentAction::answer(
                    &classification,
                    Some(LOW_CONFIDENCE_CAVEAT),
                ))
            }
        }
    }

    fn conclude(
        &mut self,
        outcome: CoreResult<AgentAction>,
        mut thinking: Vec<String>,
    ) -> AgentDecision {
        let action = match outcome {
            Ok(action) => action,
            Err(err) => {
                warn!(
                    agent = %self.identity.name,
                    code = err.code(),
                    error = %err,
                    "Decision failed"
                );
                thinking.push(format!("Error: {}", err));
                thinking.push("Attempting alternative approach...".to_string());
                self.diagnostics.push(DiagnosticEntry {
                    code: err.code().to_string(),
                    message: err.to_string(),
                    timestamp: Utc::now(),
                });
                AgentAction::delegate([Role::ErrorRecoverySpecialist], None)
            }
        };

        AgentDecision {
            agent_id: self.identity.id,
            action,
            thinking,
            decided_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boosting::{Label, TreeParams};
    use crate::escalation::roles::SPECIALIST_POOL;

    fn answer_always_config() -> AgentConfig {
        // Every confidence is >= 0.5
        AgentConfig {
            confidence_threshold: 0.5,
            ..Default::default()
        }
    }

    fn trained(config: AgentConfig) -> EscalationController {
        let mut controller = EscalationController::new(config).unwrap();
        controller.add_data_point(vec![Some(0.0)], Some(0.0));
        controller.add_data_point(vec![Some(1.0)], Some(0.0));
        controller.add_data_point(vec![Some(2.0)], Some(1.0));
        controller.add_data_point(vec![Some(3.0)], Some(1.0));
        controller.train().unwrap();
        controller
    }

    fn stump_params() -> TreeParams {
        TreeParams {
            max_depth: 1,
            min_child_weight: 0.0,
            gamma: 0.0,
            lambda: 1.0,
            eta: 0.3,
        }
    }

    #[test]
    fn test_new_controller_is_untrained() {
        let controller = EscalationController::new(AgentConfig::default()).unwrap();
        assert_eq!(controller.status(), AgentStatus::Untrained);
        assert!(controller.attempts().attempted().is_empty());
        assert_eq!(controller.identity().name, "Boosted Tree Agent");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let config = AgentConfig {
            confidence_threshold: -0.1,
            ..Default::default()
        };
        assert!(EscalationController::new(config).is_err());
    }

    #[test]
    fn test_untrained_delegates_to_data_collection() {
        let mut controller = EscalationController::new(AgentConfig::default()).unwrap();
        let decision = controller.think("What is the weather like?");
        assert_eq!(
            decision.action.target_roles(),
            vec![Role::DataCollector, Role::KnowledgeExpert]
        );
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history().labels(), &[None]);
        assert_eq!(controller.status(), AgentStatus::Untrained);
        assert!(controller.attempts().attempted().is_empty());
    }

    #[test]
    fn test_train_without_labels_fails() {
        let mut controller = EscalationController::new(AgentConfig::default()).unwrap();
        controller.think("unlabeled query");
        assert_eq!(controller.train(), Err(CoreError::EmptyDataset));
        assert_eq!(controller.status(), AgentStatus::Untrained);
    }

    #[test]
    fn test_label_sample_enables_training() {
        let mut controller = EscalationController::new(AgentConfig::default()).unwrap();
        controller.think("first query");
        controller.label_sample(0, 1.0).unwrap();
        controller.train().unwrap();
        assert_eq!(controller.status(), AgentStatus::Trained);
    }

    #[test]
    fn test_label_sample_rejects_invalid_label() {
        let mut controller = EscalationController::new(AgentConfig::default()).unwrap();
        controller.think("first query");
        assert!(matches!(
            controller.label_sample(0, 2.0),
            Err(CoreError::InvalidLabel { row: 0, .. })
        ));
        assert_eq!(controller.train(), Err(CoreError::EmptyDataset));
    }

    #[test]
    fn test_confident_answer() {
        let mut controller = trained(AgentConfig {
            tree: stump_params(),
            ..answer_always_config()
        });
        let decision = controller.think_features(&[Some(3.0)]);
        match decision.action {
            AgentAction::Answer {
                label,
                caveat,
                confidence,
                ..
            } => {
                assert_eq!(label, Label::Positive);
                assert!(caveat.is_none());
                assert!(confidence > 0.5);
            }
            other => panic!("expected answer, got {:?}", other),
        }
        assert!(decision
            .thinking
            .iter()
            .any(|l| l.starts_with("Confidence level")));
    }

    #[test]
    fn test_low_confidence_escalates_then_exhausts() {
        let mut controller = trained(AgentConfig {
            tree: stump_params(),
            ..Default::default()
        });

        for (i, expected) in SPECIALIST_POOL.iter().enumerate() {
            let decision = controller.think_features(&[Some(0.0)]);
            match &decision.action {
                AgentAction::Delegate { targets, context } => {
                    assert_eq!(targets.len(), 1);
                    assert_eq!(targets[0].role, *expected);
                    let context = context.as_ref().unwrap();
                    assert_eq!(context.attempted_approaches.len(), i + 1);
                    assert!(context.previous_confidence < 0.7);
                }
                other => panic!("expected delegation, got {:?}", other),
            }
        }

        let last = controller.think_features(&[Some(0.0)]);
        match last.action {
            AgentAction::Answer { label, caveat, .. } => {
                assert_eq!(label, Label::Negative);
                assert_eq!(caveat.as_deref(), Some(LOW_CONFIDENCE_CAVEAT));
            }
            other => panic!("expected caveated answer, got {:?}", other),
        }
        assert_eq!(controller.attempts().attempted(), &SPECIALIST_POOL);
    }

    #[test]
    fn test_fault_delegates_to_error_recovery() {
        let mut controller = trained(AgentConfig {
            tree: stump_params(),
            ..Default::default()
        });
        let decision = controller.think("   ");
        assert_eq!(
            decision.action.target_roles(),
            vec![Role::ErrorRecoverySpecialist]
        );
        assert_eq!(controller.diagnostics().len(), 1);
        assert_eq!(controller.diagnostics()[0].code, "DEGENERATE_INPUT");
        assert!(decision.thinking.iter().any(|l| l.starts_with("Error:")));
        // Faults never consume a specialist
        assert!(controller.attempts().attempted().is_empty());
    }

    #[test]
    fn test_prediction_fault_is_caught() {
        let mut controller = trained(AgentConfig {
            tree: stump_params(),
            ..Default::default()
        });
        let decision = controller.think_features(&[]);
        assert_eq!(
            decision.action.target_roles(),
            vec![Role::ErrorRecoverySpecialist]
        );
        assert_eq!(
            controller.diagnostics()[0].code,
            "FEATURE_INDEX_OUT_OF_RANGE"
        );
    }

    #[test]
    fn test_untrained_records_imputed_features() {
        let mut controller = EscalationController::new(AgentConfig::default()).unwrap();
        controller.add_data_point(vec![Some(2.0), Some(4.0)], None);
        controller.add_data_point(vec![Some(4.0), None], None);
        controller.think_features(&[None, Some(1.0)]);
        assert_eq!(
            controller.history().features()[2],
            vec![Some(3.0), Some(1.0)]
        );
    }

    #[test]
    fn test_record_example_extracts_text() {
        let mut controller = EscalationController::new(AgentConfig::default()).unwrap();
        let index = controller
            .record_example("Hello there!", Some(1.0))
            .unwrap();
        assert_eq!(index, 0);
        assert_eq!(controller.history().features()[0].len(), 9);
        assert_eq!(
            controller.record_example("", Some(0.0)),
            Err(CoreError::DegenerateInput)
        );
    }
}
