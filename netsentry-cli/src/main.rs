//! ## netsentry-cli
//! **Unified operational interface**
//!
//! Entrypoint for the netsentry telemetry engine: live capture runs,
//! deterministic simulation with digest validation, and interface listing.

use clap::Parser;

use netsentry_telemetry::logging::EventLogger;

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    EventLogger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(run_args) => commands::run_capture(run_args).await,
        Commands::Simulate(sim_args) => commands::run_simulation(sim_args),
        Commands::Interfaces => commands::list_interfaces(),
    }
}
