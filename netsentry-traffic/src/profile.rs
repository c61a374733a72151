//! Traffic shaping profiles derived from the active configuration.
//!
//! `analysis_depth` drives the length distribution and how often oversized
//! frames show up; `feature_level` drives the protocol mix.

use netsentry_config::{AnalysisDepth, FeatureLevel, MonitorConfig};
use netsentry_core::Protocol;

/// Uniform mix across the whole vocabulary.
const MIX_UNIFORM: &[(Protocol, u32)] = &[
    (Protocol::Tcp, 1),
    (Protocol::Udp, 1),
    (Protocol::Http, 1),
    (Protocol::Https, 1),
    (Protocol::Dns, 1),
    (Protocol::Icmp, 1),
];

/// Web-weighted mix resembling a typical office uplink.
const MIX_STANDARD: &[(Protocol, u32)] = &[
    (Protocol::Tcp, 30),
    (Protocol::Udp, 15),
    (Protocol::Http, 10),
    (Protocol::Https, 25),
    (Protocol::Dns, 15),
    (Protocol::Icmp, 5),
];

/// Heavier TLS share for feature-rich inspection.
const MIX_ADVANCED: &[(Protocol, u32)] = &[
    (Protocol::Tcp, 35),
    (Protocol::Udp, 10),
    (Protocol::Http, 5),
    (Protocol::Https, 30),
    (Protocol::Dns, 15),
    (Protocol::Icmp, 5),
];

/// Sampling parameters for one packet.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TrafficProfile {
    pub length_min: u32,
    pub length_max: u32,
    pub oversize_probability: f64,
    pub protocol_mix: &'static [(Protocol, u32)],
}

impl TrafficProfile {
    pub(crate) fn for_config(config: &MonitorConfig) -> Self {
        let (length_min, length_max, oversize_probability) = match config.analysis_depth {
            AnalysisDepth::Basic => (40, 600, 0.01),
            AnalysisDepth::Intermediate => (40, 1500, 0.02),
            AnalysisDepth::Deep => (40, 1500, 0.04),
        };
        let protocol_mix = match config.feature_level {
            FeatureLevel::Low => MIX_UNIFORM,
            FeatureLevel::Standard => MIX_STANDARD,
            FeatureLevel::Advanced => MIX_ADVANCED,
        };
        Self {
            length_min,
            length_max,
            oversize_probability,
            protocol_mix,
        }
    }
}
