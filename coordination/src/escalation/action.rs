//! Agent actions — what the orchestrator receives from one `think` call

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::roles::Role;
use crate::boosting::{Classification, Label};

/// Caveat attached to an answer given after every specialist was tried.
pub const LOW_CONFIDENCE_CAVEAT: &str = "Consider seeking additional information or expert review.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegateTarget {
    pub role: Role,
    pub name: String,
    pub description: String,
}

impl From<Role> for DelegateTarget {
    fn from(role: Role) -> Self {
        Self {
            role,
            name: role.name().to_string(),
            description: role.description().to_string(),
        }
    }
}

/// Context handed to a specialist on low confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationContext {
    pub previous_confidence: f64,
    /// Every specialist attempted so far, including the current target
    pub attempted_approaches: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AgentAction {
    Answer {
        label: Label,
        confidence: f64,
        margin: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caveat: Option<String>,
    },
    Delegate {
        targets: Vec<DelegateTarget>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<DelegationContext>,
    },
}

impl AgentAction {
    pub fn answer(classification: &Classification, caveat: Option<&str>) -> Self {
        Self::Answer {
            label: classification.label,
            confidence: classification.confidence,
            margin: classification.margin,
            caveat: caveat.map(str::to_string),
        }
    }

    pub fn delegate<I>(roles: I, context: Option<DelegationContext>) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        Self::Delegate {
            targets: roles.into_iter().map(DelegateTarget::from).collect(),
            context,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer { .. })
    }

    /// Delegation targets; empty for answers.
    pub fn target_roles(&self) -> Vec<Role> {
        match self {
            Self::Delegate { targets, .. } => targets.iter().map(|t| t.role).collect(),
            Self::Answer { .. } => Vec::new(),
        }
    }

    /// Human-readable rendering of the action
    pub fn render(&self) -> String {
        match self {
            Self::Answer {
                label,
                confidence,
                caveat: None,
                ..
            } => format!(
                "Prediction: {} with {:.1}% confidence",
                label,
                confidence * 100.0
            ),
            Self::Answer {
                label,
                confidence,
                caveat: Some(caveat),
                ..
            } => format!(
                "Low confidence prediction: {} ({:.1}% confidence). {}",
                label,
                confidence * 100.0,
                caveat
            ),
            Self::Delegate { targets, .. } => {
                let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
                format!("Delegating to {}", names.join(", "))
            }
        }
    }
}

/// Result of one `think` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDecision {
    pub agent_id: Uuid,
    pub action: AgentAction,
    /// Reasoning trace for this call, in order
    pub thinking: Vec<String>,
    pub decided_at: DateTime<Utc>,
}

impl AgentDecision {
    /// Compact summary for logging
    pub fn summary(&self) -> String {
        format!("agent={} {}", self.agent_id, self.action.render())
    }
}
