//! Agent configuration
//!
//! Defaults match the production agent: confidence threshold 0.7, depth 6,
//! min child weight 1, gamma 0.1, lambda 1, eta 0.3. Values can be overridden
//! from `AGENT_*` environment variables.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::boosting::TreeParams;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Display name of the agent
    pub name: String,
    /// Minimum confidence required to answer directly
    pub confidence_threshold: f64,
    pub tree: TreeParams,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "Boosted Tree Agent".to_string(),
            confidence_threshold: 0.7,
            tree: TreeParams::default(),
        }
    }
}

impl AgentConfig {
    /// Default config overlaid with environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values returned by `lookup`; unparsable values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("AGENT_NAME") {
            self.name = name;
        }
        override_parsed(
            &lookup,
            "AGENT_CONFIDENCE_THRESHOLD",
            &mut self.confidence_threshold,
        );
        override_parsed(&lookup, "AGENT_MAX_DEPTH", &mut self.tree.max_depth);
        override_parsed(
            &lookup,
            "AGENT_MIN_CHILD_WEIGHT",
            &mut self.tree.min_child_weight,
        );
        override_parsed(&lookup, "AGENT_GAMMA", &mut self.tree.gamma);
        override_parsed(&lookup, "AGENT_LAMBDA", &mut self.tree.lambda);
        override_parsed(&lookup, "AGENT_ETA", &mut self.tree.eta);
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        let t = self.confidence_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(CoreError::InvalidConfig(format!(
                "confidence_threshold must be in [0, 1], got {}",
                t
            )));
        }
        self.tree.validate()
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!(key, value = %raw, "Ignoring unparsable override"),
        }
    }
}
