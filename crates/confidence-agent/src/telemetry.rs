//! Decision telemetry
//!
//! Each `think` call, together with the handler reports it produced, is
//! appended as one JSON object per line to the configured telemetry file.

use std::path::Path;

use coordination::AgentDecision;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dispatch::HandlerReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub agent: String,
    pub query: String,
    pub decision: AgentDecision,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<HandlerReport>,
}

impl DecisionRecord {
    pub fn summary(&self) -> String {
        format!(
            "agent={} query={:?} {}",
            self.agent,
            self.query,
            self.decision.action.render()
        )
    }
}

/// Append `record` to a JSONL file. Failures are logged, never raised.
pub fn append_decision(record: &DecisionRecord, path: &Path) {
    match serde_json::to_string(record) {
        Ok(json) => {
            use std::io::Write;
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
            {
                Ok(mut file) => {
                    if let Err(e) = writeln!(file, "{json}") {
                        warn!("Failed to append decision: {e}");
                    } else {
                        debug!(path = %path.display(), "Appended decision record");
                    }
                }
                Err(e) => warn!("Failed to open telemetry file: {e}"),
            }
        }
        Err(e) => warn!("Failed to serialize decision: {e}"),
    }
}

/// Read every record from a JSONL telemetry file.
pub fn read_decisions(path: &Path) -> std::io::Result<Vec<DecisionRecord>> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: DecisionRecord = serde_json::from_str(&line)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        records.push(record);
    }
    Ok(records)
}
