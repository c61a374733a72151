//! Packet anomaly classifier.
//!
//! Classification is a total function: every syntactically valid
//! (observation, configuration) pair yields a verdict, never an error.
//! Entropy is an injected seeded RNG, so a fixed (stream, configuration,
//! seed) triple reproduces the same verdicts exactly.
//!
//! ## Detection policy
//!
//! - Frames of `length >= OVERSIZE_BYTES` are always anomalous, score 1.0.
//! - Otherwise one uniform draw per packet: anomalous iff the draw falls
//!   below `detection_rate(ml_model, feature_level)`.
//!
//! Rates: base(autoencoder) = 0.05, base(isolation_forest) = 0.06,
//! base(both) = 0.08; sensitivity(low) = 0.5, sensitivity(standard) = 1.0,
//! sensitivity(advanced) = 1.5; rate = base * sensitivity. With the default
//! traffic profile (2% oversized frames) that puts isolation_forest +
//! advanced at a long-run anomaly rate of 0.02 + 0.98 * 0.09, about 10.8%.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use netsentry_config::{FeatureLevel, MlModel, MonitorConfig};
use netsentry_core::PacketRecord;

/// Frames at or above this size are anomalous regardless of model.
pub const OVERSIZE_BYTES: u32 = 2000;

/// Probability that an in-range frame is flagged under the given detection
/// configuration.
pub fn detection_rate(model: MlModel, level: FeatureLevel) -> f64 {
    let base = match model {
        MlModel::Autoencoder => 0.05,
        MlModel::IsolationForest => 0.06,
        MlModel::Both => 0.08,
    };
    let sensitivity = match level {
        FeatureLevel::Low => 0.5,
        FeatureLevel::Standard => 1.0,
        FeatureLevel::Advanced => 1.5,
    };
    base * sensitivity
}

/// Outcome of classifying one packet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    pub is_anomaly: bool,
    /// Anomalies score in (0.6, 1.0], normal traffic in [0, 0.4).
    pub score: f64,
}

/// Seedable anomaly classifier.
pub struct AnomalyClassifier {
    rng: SmallRng,
}

impl AnomalyClassifier {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Classifies one packet under the active detection configuration.
    ///
    /// Consumes exactly one RNG draw per call, so verdict sequences are
    /// reproducible packet-for-packet under a fixed seed.
    pub fn classify(&mut self, record: &PacketRecord, config: &MonitorConfig) -> Verdict {
        let roll: f64 = self.rng.random();
        if record.length >= OVERSIZE_BYTES {
            return Verdict {
                is_anomaly: true,
                score: 1.0,
            };
        }
        let rate = detection_rate(config.ml_model, config.feature_level);
        if roll < rate {
            Verdict {
                is_anomaly: true,
                score: 0.6 + 0.4 * (1.0 - roll / rate),
            }
        } else {
            Verdict {
                is_anomaly: false,
                score: 0.4 * (roll - rate) / (1.0 - rate),
            }
        }
    }
}
