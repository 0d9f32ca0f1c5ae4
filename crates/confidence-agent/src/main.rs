//! Confidence-gated classification agent
//!
//! Trains a single-round boosted tree on labeled text, then answers queries
//! when confident and delegates to specialist roles when not.
//!
//! # Usage
//!
//! ```bash
//! # Answer queries, training on a JSONL file of labeled examples
//! confidence-agent --training data/messages.jsonl ask "FREE PRIZE!!!" "lunch at noon?"
//!
//! # Print the trained tree
//! confidence-agent --training data/messages.jsonl inspect
//!
//! # Environment overrides
//! AGENT_CONFIDENCE_THRESHOLD=0.55 AGENT_MAX_DEPTH=3 confidence-agent ask "hello"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confidence_agent::config::OrchestratorConfig;
use confidence_agent::session::AgentSession;
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSONL file of labeled examples (overrides AGENT_TRAINING_PATH)
    #[arg(long)]
    training: Option<PathBuf>,

    /// Append decisions to this JSONL file (overrides AGENT_TELEMETRY_PATH)
    #[arg(long)]
    telemetry: Option<PathBuf>,

    /// Minimum confidence to answer directly (overrides AGENT_CONFIDENCE_THRESHOLD)
    #[arg(long)]
    threshold: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide on each query in order, printing one JSON record per line
    Ask {
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Print the trained tree as JSON, with the feature names its indices refer to
    Inspect,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = OrchestratorConfig::load(args.config.as_deref())?;
    if let Some(path) = args.training {
        config.training_path = Some(path);
    }
    if let Some(path) = args.telemetry {
        config.telemetry_path = Some(path);
    }
    if let Some(threshold) = args.threshold {
        config.agent.confidence_threshold = threshold;
        config.agent.validate().context("Invalid --threshold")?;
    }

    info!(
        agent = %config.agent.name,
        threshold = config.agent.confidence_threshold,
        max_depth = config.agent.tree.max_depth,
        "Confidence agent starting"
    );

    let mut session = AgentSession::from_config(config)?;

    match args.command {
        Command::Ask { queries } => {
            for query in &queries {
                let record = session.ask(query).await;
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        Command::Inspect => match session.tree_report() {
            Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
            None => anyhow::bail!("No trained tree: supply labeled examples with --training"),
        },
    }

    Ok(())
}
