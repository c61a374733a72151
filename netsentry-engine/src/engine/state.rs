//! Engine state and the tick pipeline.
//!
//! All mutable engine state (configuration, history buffer, generator,
//! classifier) lives here behind one lock in the runtime. A tick is a
//! single synchronous pass, so the configuration snapshotted at its start
//! applies to the whole observation and no consumer can ever see a
//! half-applied tick.

use serde::Serialize;
use tracing::warn;

use netsentry_analytics::{summarize, TrafficSummary};
use netsentry_config::{ConfigPatch, MonitorConfig};
use netsentry_core::{HistoryBuffer, PacketObservation};
use netsentry_detection::AnomalyClassifier;
use netsentry_traffic::TrafficGenerator;

use super::interfaces::InterfaceInfo;

/// Decorrelates the classifier's entropy stream from the generator's.
const CLASSIFIER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Immutable view published to consumers after every buffer mutation.
///
/// Packets and aggregates always come from the same tick; the aggregates are
/// recomputed from the packet list itself and can never drift from it.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EngineSnapshot {
    /// Buffer contents in chronological order, oldest first.
    pub packets: Vec<PacketObservation>,
    pub summary: TrafficSummary,
}

impl EngineSnapshot {
    /// The most recent `n` observations, newest first.
    pub fn latest_packets(&self, n: usize) -> Vec<PacketObservation> {
        self.packets.iter().rev().take(n).cloned().collect()
    }
}

pub(crate) struct EngineState {
    config: MonitorConfig,
    buffer: HistoryBuffer,
    generator: TrafficGenerator,
    classifier: AnomalyClassifier,
}

impl EngineState {
    pub(crate) fn new(config: MonitorConfig, seed: u64, start_ns: u64) -> Self {
        let buffer = HistoryBuffer::new(config.buffer_size);
        Self {
            config,
            buffer,
            generator: TrafficGenerator::new(seed, start_ns),
            classifier: AnomalyClassifier::new(seed ^ CLASSIFIER_SEED_SALT),
        }
    }

    pub(crate) fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// One pipeline pass: generate → classify → buffer.
    pub(crate) fn tick(&mut self) -> PacketObservation {
        let record = self.generator.next_record(&self.config);
        let verdict = self.classifier.classify(&record, &self.config);
        let observation = record.classified(verdict.is_anomaly, verdict.score);
        self.buffer.push(observation.clone());
        observation
    }

    /// Applies a partial update and resizes the buffer in the same step, so
    /// capacity and configured size never disagree.
    ///
    /// An interface name outside the known catalog is dropped from the patch
    /// before the merge; the remaining fields still land.
    pub(crate) fn apply_patch(
        &mut self,
        patch: &ConfigPatch,
        known: &[InterfaceInfo],
    ) -> MonitorConfig {
        let mut patch = patch.clone();
        if let Some(name) = &patch.network_interface {
            if !known.iter().any(|interface| &interface.name == name) {
                warn!(interface = %name, "ignoring unknown capture interface");
                patch.network_interface = None;
            }
        }
        self.config = self.config.merged(&patch);
        self.buffer.resize(self.config.buffer_size);
        self.config.clone()
    }

    pub(crate) fn snapshot(&self) -> EngineSnapshot {
        let packets = self.buffer.snapshot();
        let summary = summarize(&packets);
        EngineSnapshot { packets, summary }
    }

    pub(crate) fn state_digest(&self) -> String {
        self.generator.state_digest()
    }
}
