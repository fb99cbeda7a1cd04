//! CLI definition and command dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use listener::AppState;
use nodes::{forge_pipeline, PipelineRunner};
use pipeline::{ForgeState, ProjectId};
use reference::ReferenceData;

use crate::config::{load_config, ConfigOverrides, KernelConfig, LogFormat};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// FORGE kernel — run ideas through the gauntlet pipeline.
#[derive(Debug, Parser)]
#[command(name = "forge-kernel", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Config file (defaults to ./forge-kernel.toml when present).
    #[arg(long, env = "FORGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Reference data JSON document.
    #[arg(long, env = "FORGE_REFERENCE_DATA", global = true)]
    pub reference_data: Option<PathBuf>,

    /// Log format.
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Default log filter, e.g. `info` or `nodes=debug`. `RUST_LOG` wins.
    #[arg(long, env = "FORGE_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// OTLP collector endpoint for span export.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", global = true)]
    pub otlp_endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Serve the HTTP API until interrupted.
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8000.
        #[arg(long, env = "FORGE_BIND")]
        bind: Option<String>,
    },

    /// Run one idea through the pipeline and print the final state as JSON.
    Run {
        /// Raw idea text.
        idea: String,

        /// Pre-structured brief (defaults to the normalised idea).
        #[arg(long)]
        feature_brief: Option<String>,

        /// External project id to carry through.
        #[arg(long)]
        project_id: Option<String>,
    },
}

impl Cli {
    /// Loads the config file and applies flag/env overrides.
    pub(crate) fn resolve_config(&self) -> anyhow::Result<KernelConfig> {
        let config = load_config(self.config.as_deref()).context("failed to load configuration")?;
        let bind = match &self.command {
            Command::Serve { bind } => bind.clone(),
            Command::Run { .. } => None,
        };
        Ok(config.with_overrides(ConfigOverrides {
            bind,
            reference_data: self.reference_data.clone(),
            log_format: self.log_format,
            log_level: self.log_level.clone(),
            otlp_endpoint: self.otlp_endpoint.clone(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

pub(crate) async fn run(command: Command, config: KernelConfig) -> anyhow::Result<()> {
    let runner = Arc::new(build_runner(&config)?);

    match command {
        Command::Serve { .. } => {
            let addr = config.bind_addr()?;
            listener::serve(addr, AppState::new(runner), shutdown_signal()).await?;
        }
        Command::Run {
            idea,
            feature_brief,
            project_id,
        } => {
            let initial = initial_state(idea, feature_brief, project_id);
            let state = runner.run(&initial)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }
    Ok(())
}

fn build_runner(config: &KernelConfig) -> anyhow::Result<PipelineRunner> {
    let reference = ReferenceData::load(&config.reference_data).with_context(|| {
        format!(
            "failed to load reference data from {}",
            config.reference_data.display()
        )
    })?;
    Ok(forge_pipeline(Arc::new(reference)))
}

fn initial_state(
    idea: String,
    feature_brief: Option<String>,
    project_id: Option<String>,
) -> ForgeState {
    ForgeState {
        idea,
        feature_brief: feature_brief.filter(|brief| !brief.is_empty()),
        project_id: project_id.and_then(ProjectId::new),
        ..ForgeState::default()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c; shutting down");
        return;
    }
    tracing::info!("shutdown requested");
}
