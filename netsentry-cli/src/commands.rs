use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use netsentry_config::MonitorConfig;
use netsentry_engine::{
    EngineOptions, InterfaceProvider, MonitorEngine, StaticInterfaces,
};

#[derive(Parser)]
#[command(name = "netsentry", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a live capture for a fixed duration
    Run(RunArgs),
    /// Drive a deterministic simulation (fixed seed, manual ticks)
    Simulate(SimulateArgs),
    /// List the known capture interfaces
    Interfaces,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Capture duration in seconds
    #[arg(long, default_value_t = 10)]
    pub duration: u64,
    /// Tick cadence in milliseconds
    #[arg(long, default_value_t = 250)]
    pub tick_ms: u64,
    /// Entropy seed; omit for a random run
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write the captured packet set to this path as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of ticks to drive
    #[arg(long, default_value_t = 1000)]
    pub ticks: usize,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Fail unless the stream digest matches this hex value
    #[arg(long)]
    pub validate_digest: Option<String>,
}

pub async fn run_capture(args: RunArgs) -> anyhow::Result<()> {
    let config = MonitorConfig::load()?;
    info!(interface = %config.network_interface, "starting capture run");

    let engine = MonitorEngine::new(EngineOptions {
        config,
        seed: args.seed,
        tick_interval: Duration::from_millis(args.tick_ms),
        ..EngineOptions::default()
    });

    engine.start();
    tokio::time::sleep(Duration::from_secs(args.duration)).await;
    engine.stop();

    print_summary(&engine);

    if let Some(path) = &args.export {
        export_packets(&engine, path)?;
        println!("exported packet log to {}", path.display());
    }
    Ok(())
}

pub fn run_simulation(args: SimulateArgs) -> anyhow::Result<()> {
    let engine = MonitorEngine::new(EngineOptions::deterministic(args.seed));
    for _ in 0..args.ticks {
        engine.tick_now();
    }

    print_summary(&engine);
    let digest = engine.state_digest();
    println!("stream digest: {digest}");

    if let Some(expected) = &args.validate_digest {
        anyhow::ensure!(
            &digest == expected,
            "digest mismatch: expected {expected}, got {digest}"
        );
        println!("digest validated");
    }
    Ok(())
}

pub fn list_interfaces() -> anyhow::Result<()> {
    for interface in StaticInterfaces.interfaces() {
        println!("{:<8} {}", interface.name, interface.description);
    }
    Ok(())
}

fn print_summary(engine: &MonitorEngine) {
    let snapshot = engine.snapshot();
    println!(
        "captured {} packets, {} anomalies",
        snapshot.summary.total_packets, snapshot.summary.total_anomalies
    );
    for (protocol, count) in &snapshot.summary.protocols {
        println!("  {protocol:<6} {count}");
    }
}

fn export_packets(engine: &MonitorEngine, path: &PathBuf) -> anyhow::Result<()> {
    let snapshot = engine.snapshot();
    let file = File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &snapshot.packets)
        .context("serializing packet log")?;
    Ok(())
}
