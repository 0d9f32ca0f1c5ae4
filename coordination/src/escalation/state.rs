//! Escalation State — agent identity, training status and attempted specialists

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::roles::{Role, SPECIALIST_POOL};

/// Whether the classifier can be consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Untrained,
    Trained,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Untrained => write!(f, "untrained"),
            Self::Trained => write!(f, "trained"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub id: Uuid,
    pub name: String,
    /// Agent that spawned this one, if any
    pub parent_id: Option<Uuid>,
}

impl AgentIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id: None,
        }
    }
}

/// Specialists already tried in this session.
///
/// Grows monotonically and never holds a role twice. The only mutator is
/// [`AttemptTracker::record_attempt`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttemptTracker {
    attempted: Vec<Role>,
    last_attempt_at: Option<DateTime<Utc>>,
}

impl AttemptTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// First pool role not yet attempted.
    pub fn next_available_role(&self) -> Option<Role> {
        SPECIALIST_POOL
            .iter()
            .copied()
            .find(|role| !self.attempted.contains(role))
    }

    /// Record `role`; returns false if it was already recorded.
    pub fn record_attempt(&mut self, role: Role) -> bool {
        if self.attempted.contains(&role) {
            return false;
        }
        self.attempted.push(role);
        self.last_attempt_at = Some(Utc::now());
        true
    }

    /// Attempted roles in the order they were recorded
    pub fn attempted(&self) -> &[Role] {
        &self.attempted
    }

    pub fn contains(&self, role: Role) -> bool {
        self.attempted.contains(&role)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_available_role().is_none()
    }

    pub fn last_attempt_at(&self) -> Option<DateTime<Utc>> {
        self.last_attempt_at
    }
}
