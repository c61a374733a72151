//! ## netsentry-telemetry::logging
//! **Structured logging with tracing**
//!
//! One `init` call at process start wires the fmt subscriber with an
//! env-driven filter; components then log through the `tracing` macros.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_thread_names(true)
            .with_span_events(FmtSpan::ENTER)
            .init()
    }

    /// Logs one capture event with its anomaly verdict.
    pub fn log_packet(packet_id: u64, protocol: &str, is_anomaly: bool) {
        tracing::debug!(packet_id, protocol, is_anomaly, "packet classified");
    }
}
