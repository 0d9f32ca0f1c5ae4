use anyhow::{Context, Result};
use coordination::AgentConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level orchestrator configuration.
///
/// Loaded from an optional TOML file, then overlaid with environment
/// variables; CLI flags are applied last by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Controller and tree settings (`[agent]` table)
    pub agent: AgentConfig,
    /// JSONL file of labeled examples
    pub training_path: Option<PathBuf>,
    /// Append-only JSONL decision log
    pub telemetry_path: Option<PathBuf>,
}

impl OrchestratorConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(|key| std::env::var(key).ok());
        config
            .agent
            .validate()
            .context("Invalid agent configuration")?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("AGENT_TRAINING_PATH") {
            self.training_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("AGENT_TELEMETRY_PATH") {
            self.telemetry_path = Some(PathBuf::from(path));
        }
        self.agent = self.agent.with_overrides(&lookup);
        self
    }
}
