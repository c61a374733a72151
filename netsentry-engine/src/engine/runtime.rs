//! Capture controller runtime.
//!
//! `MonitorEngine` is a cheap-to-clone handle over shared engine state. The
//! controller is a two-state machine (Idle / Capturing): `start` spawns the
//! periodic tick loop, `stop` signals it to halt at the next tick boundary.
//! Ticks are synchronous under the state lock, so an in-flight tick always
//! completes before a stop takes effect and no partial observation is ever
//! admitted.
//!
//! Consumers never touch live state: every mutation republishes an immutable
//! `Arc<EngineSnapshot>` through a watch channel, read either by polling the
//! read surface or by subscribing to the channel.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use rand::Rng;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use netsentry_analytics::TrafficBucket;
use netsentry_config::{ConfigPatch, MonitorConfig};
use netsentry_core::{PacketObservation, Protocol};
use netsentry_telemetry::{EventLogger, MetricsRecorder};

use super::interfaces::{InterfaceInfo, InterfaceProvider, StaticInterfaces};
use super::state::{EngineSnapshot, EngineState};

/// Construction parameters for a [`MonitorEngine`].
#[derive(Clone, Debug)]
pub struct EngineOptions {
    /// Initial configuration.
    pub config: MonitorConfig,
    /// Entropy seed for generator and classifier. `None` draws one seed at
    /// construction; the engine never reads global randomness afterwards.
    pub seed: Option<u64>,
    /// Virtual-clock start in nanoseconds since the unix epoch. `None` uses
    /// the wall clock.
    pub start_ns: Option<u64>,
    /// Cadence of the capture loop.
    pub tick_interval: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            config: MonitorConfig::default(),
            seed: None,
            start_ns: None,
            tick_interval: Duration::from_millis(250),
        }
    }
}

impl EngineOptions {
    /// Fully deterministic options: fixed seed, virtual clock starting at
    /// zero. Used by simulation mode and the test suite.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            start_ns: Some(0),
            ..Self::default()
        }
    }
}

struct EngineInner {
    state: Mutex<EngineState>,
    snapshot_tx: watch::Sender<Arc<EngineSnapshot>>,
    capturing: AtomicBool,
    stop_tx: Mutex<Option<watch::Sender<bool>>>,
    interfaces: Vec<InterfaceInfo>,
    metrics: MetricsRecorder,
    tick_interval: Duration,
}

impl EngineInner {
    /// One pipeline pass: generate → classify → push → summarize → publish.
    ///
    /// The snapshot is published while the state lock is held, so snapshots
    /// can never be observed out of order with respect to buffer mutations.
    fn tick_once(&self) {
        let started = Instant::now();
        let observation = {
            let mut state = self.state.lock();
            let observation = state.tick();
            self.snapshot_tx.send_replace(Arc::new(state.snapshot()));
            observation
        };
        self.metrics.packets_total.inc();
        if observation.is_anomaly {
            self.metrics.anomalies_total.inc();
        }
        self.metrics
            .tick_latency
            .observe(started.elapsed().as_nanos() as f64);
        EventLogger::log_packet(
            observation.id,
            observation.protocol.as_str(),
            observation.is_anomaly,
        );
    }
}

/// Handle to one live telemetry engine instance.
///
/// Clones share the same engine; independent instances (for tests or
/// multiple feeds) are built from separate `EngineOptions`.
#[derive(Clone)]
pub struct MonitorEngine {
    inner: Arc<EngineInner>,
}

impl MonitorEngine {
    /// Creates an engine with the fallback interface catalog.
    pub fn new(options: EngineOptions) -> Self {
        Self::with_interfaces(options, &StaticInterfaces)
    }

    /// Creates an engine with a caller-supplied interface catalog.
    pub fn with_interfaces(options: EngineOptions, provider: &dyn InterfaceProvider) -> Self {
        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        let start_ns = options.start_ns.unwrap_or_else(|| {
            Utc::now().timestamp_nanos_opt().unwrap_or_default().max(0) as u64
        });
        info!(seed, start_ns, "initializing telemetry engine");

        let state = EngineState::new(options.config, seed, start_ns);
        let (snapshot_tx, _) = watch::channel(Arc::new(state.snapshot()));

        Self {
            inner: Arc::new(EngineInner {
                state: Mutex::new(state),
                snapshot_tx,
                capturing: AtomicBool::new(false),
                stop_tx: Mutex::new(None),
                interfaces: provider.interfaces(),
                metrics: MetricsRecorder::new(),
                tick_interval: options.tick_interval,
            }),
        }
    }

    /// Idle → Capturing. Spawns the tick loop; returns `false` if a capture
    /// is already running. Must be called within a tokio runtime.
    pub fn start(&self) -> bool {
        if self.inner.capturing.swap(true, Ordering::SeqCst) {
            debug!("start requested while already capturing");
            return false;
        }
        let (stop_tx, mut stop_rx) = watch::channel(false);
        *self.inner.stop_tx.lock() = Some(stop_tx);

        let inner = Arc::clone(&self.inner);
        info!(interval_ms = inner.tick_interval.as_millis() as u64, "capture started");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.tick_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => inner.tick_once(),
                }
            }
            debug!("capture loop exited");
        });
        true
    }

    /// Capturing → Idle. The in-flight tick, if any, completes; no further
    /// observations are admitted after the loop sees the signal.
    pub fn stop(&self) {
        if let Some(stop_tx) = self.inner.stop_tx.lock().take() {
            let _ = stop_tx.send(true);
            info!("capture stopped");
        }
        self.inner.capturing.store(false, Ordering::SeqCst);
    }

    pub fn is_capturing(&self) -> bool {
        self.inner.capturing.load(Ordering::SeqCst)
    }

    /// Drives exactly one pipeline pass synchronously. This is the unit the
    /// background loop executes; simulation mode and tests call it directly
    /// for deterministic tick counts.
    pub fn tick_now(&self) {
        self.inner.tick_once();
    }

    /// Applies a partial configuration update. Merging and buffer resizing
    /// happen under one lock acquisition, so capacity and configured size
    /// never disagree, and a tick in progress finishes under the old
    /// configuration before the update lands.
    pub fn update_config(&self, patch: &ConfigPatch) -> MonitorConfig {
        let mut state = self.inner.state.lock();
        let config = state.apply_patch(patch, &self.inner.interfaces);
        self.inner.snapshot_tx.send_replace(Arc::new(state.snapshot()));
        debug!(buffer_size = config.buffer_size, "configuration updated");
        config
    }

    pub fn config(&self) -> MonitorConfig {
        self.inner.state.lock().config().clone()
    }

    /// Latest published snapshot. Packets and aggregates always come from
    /// the same tick.
    pub fn snapshot(&self) -> Arc<EngineSnapshot> {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Push-style consumption: resolves whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<EngineSnapshot>> {
        self.inner.snapshot_tx.subscribe()
    }

    /// The most recent `n` observations, newest first.
    pub fn latest_packets(&self, n: usize) -> Vec<PacketObservation> {
        self.snapshot().latest_packets(n)
    }

    /// Chronological chart series, oldest bucket first.
    pub fn chart_series(&self) -> Vec<TrafficBucket> {
        self.snapshot().summary.series.clone()
    }

    pub fn protocol_distribution(&self) -> BTreeMap<Protocol, u64> {
        self.snapshot().summary.protocols.clone()
    }

    pub fn known_interfaces(&self) -> &[InterfaceInfo] {
        &self.inner.interfaces
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.inner.metrics
    }

    /// Hex digest of the generated stream so far; stable for a fixed seed.
    pub fn state_digest(&self) -> String {
        self.inner.state.lock().state_digest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_starts_idle_with_empty_snapshot() {
        let engine = MonitorEngine::new(EngineOptions::deterministic(1));
        assert!(!engine.is_capturing());
        assert!(engine.latest_packets(10).is_empty());
        assert!(engine.chart_series().is_empty());
        assert!(engine.protocol_distribution().is_empty());
    }

    #[test]
    fn manual_ticks_publish_snapshots() {
        let engine = MonitorEngine::new(EngineOptions::deterministic(1));
        engine.tick_now();
        engine.tick_now();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.packets.len(), 2);
        assert_eq!(snapshot.summary.total_packets, 2);
        assert_eq!(engine.metrics().packets_total.get(), 2.0);
    }

    #[test]
    fn independent_engines_do_not_share_state() {
        let a = MonitorEngine::new(EngineOptions::deterministic(1));
        let b = MonitorEngine::new(EngineOptions::deterministic(2));
        a.tick_now();
        assert_eq!(a.snapshot().packets.len(), 1);
        assert!(b.snapshot().packets.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop_drive_the_state_machine() {
        let engine = MonitorEngine::new(EngineOptions::deterministic(3));
        assert!(engine.start());
        assert!(engine.is_capturing());
        // A second start is refused while capturing.
        assert!(!engine.start());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!engine.latest_packets(5).is_empty());

        engine.stop();
        assert!(!engine.is_capturing());
    }
}
