//! Delegation roles
//!
//! The closed set of targets the controller can hand work to. Mapping a role
//! to something that actually runs is the orchestrator's job.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Gathers labeled training examples
    DataCollector,
    /// Supplies domain knowledge while the model is untrained
    KnowledgeExpert,
    DetailAnalyzer,
    PatternRecognizer,
    ContextExplorer,
    AlternativePerspective,
    SolutionSynthesizer,
    /// Handles faults raised while computing a decision
    ErrorRecoverySpecialist,
}

/// Specialists tried on low confidence, in priority order.
pub const SPECIALIST_POOL: [Role; 5] = [
    Role::DetailAnalyzer,
    Role::PatternRecognizer,
    Role::ContextExplorer,
    Role::AlternativePerspective,
    Role::SolutionSynthesizer,
];

/// Roles engaged while the model has no training.
pub const DATA_COLLECTION_ROLES: [Role; 2] = [Role::DataCollector, Role::KnowledgeExpert];

impl Role {
    pub const ALL: [Role; 8] = [
        Role::DataCollector,
        Role::KnowledgeExpert,
        Role::DetailAnalyzer,
        Role::PatternRecognizer,
        Role::ContextExplorer,
        Role::AlternativePerspective,
        Role::SolutionSynthesizer,
        Role::ErrorRecoverySpecialist,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DataCollector => "Data Collector",
            Self::KnowledgeExpert => "Knowledge Expert",
            Self::DetailAnalyzer => "Detail Analyzer",
            Self::PatternRecognizer => "Pattern Recognizer",
            Self::ContextExplorer => "Context Explorer",
            Self::AlternativePerspective => "Alternative Perspective",
            Self::SolutionSynthesizer => "Solution Synthesizer",
            Self::ErrorRecoverySpecialist => "Error Recovery Specialist",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DataCollector => "Gather training examples",
            Self::KnowledgeExpert => "Provide domain expertise",
            Self::DetailAnalyzer => "Deep dive into specific aspects",
            Self::PatternRecognizer => "Identify patterns and relationships",
            Self::ContextExplorer => "Explore broader context",
            Self::AlternativePerspective => "Consider different viewpoints",
            Self::SolutionSynthesizer => "Combine multiple approaches",
            Self::ErrorRecoverySpecialist => "Handle error cases and try alternative methods",
        }
    }

    /// Problem-solving approach identifier, for specialists only.
    pub fn approach(&self) -> Option<&'static str> {
        match self {
            Self::DetailAnalyzer => Some("detailed_analysis"),
            Self::PatternRecognizer => Some("pattern_recognition"),
            Self::ContextExplorer => Some("context_exploration"),
            Self::AlternativePerspective => Some("alternative_view"),
            Self::SolutionSynthesizer => Some("synthesis"),
            _ => None,
        }
    }

    pub fn is_specialist(&self) -> bool {
        SPECIALIST_POOL.contains(self)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
