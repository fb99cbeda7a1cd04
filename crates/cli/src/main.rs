//! FORGE kernel entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration** — load `forge-kernel.toml` (if any) and apply
//!    command-line/environment overrides.
//! 2. **Wire observability** — configure `tracing-subscriber` with a text or
//!    JSON layer and, when an endpoint is configured, an OpenTelemetry OTLP
//!    exporter. All `tracing` spans and events emitted by every crate in the
//!    workspace flow through this subscriber.
//! 3. **Construct the pipeline** — load the reference data once and build the
//!    five-step FORGE pipeline around it.
//! 4. **Select mode** — `serve` runs the HTTP API; `run` pushes a single idea
//!    through the pipeline and prints the final state.

mod commands;
mod config;
mod telemetry;

use clap::Parser;

use commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let _telemetry = telemetry::init(&config.log, config.otlp_endpoint.as_deref())?;

    commands::run(cli.command, config).await
}
