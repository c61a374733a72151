//! The monitor configuration record and its enumerated domains.
//!
//! Every field always holds a valid enumerated or bounded value; the typed
//! enums make out-of-domain values unrepresentable, and `buffer_size` is
//! validated against the history-buffer capacity range.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Detection model selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MlModel {
    Autoencoder,
    IsolationForest,
    Both,
}

/// Feature extraction level; stricter levels increase detection sensitivity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureLevel {
    Low,
    Standard,
    Advanced,
}

/// Depth of per-packet analysis; shapes the synthetic traffic profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisDepth {
    Basic,
    Intermediate,
    Deep,
}

/// Export encryption algorithm. Cosmetic from the engine's point of view,
/// but part of the record and merge contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionAlgorithm {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "SHA")]
    Sha,
    #[serde(rename = "AES-256")]
    Aes256,
    #[serde(rename = "AES-192")]
    Aes192,
}

impl fmt::Display for MlModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MlModel::Autoencoder => "autoencoder",
            MlModel::IsolationForest => "isolation_forest",
            MlModel::Both => "both",
        })
    }
}

impl fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeatureLevel::Low => "low",
            FeatureLevel::Standard => "standard",
            FeatureLevel::Advanced => "advanced",
        })
    }
}

impl fmt::Display for AnalysisDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalysisDepth::Basic => "basic",
            AnalysisDepth::Intermediate => "intermediate",
            AnalysisDepth::Deep => "deep",
        })
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EncryptionAlgorithm::Rsa => "RSA",
            EncryptionAlgorithm::Sha => "SHA",
            EncryptionAlgorithm::Aes256 => "AES-256",
            EncryptionAlgorithm::Aes192 => "AES-192",
        })
    }
}

/// Capture and detection configuration, process-wide, mutated only through
/// [`MonitorConfig::merged`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct MonitorConfig {
    /// Detection model driving classification sensitivity.
    #[serde(default = "default_ml_model")]
    pub ml_model: MlModel,

    /// Feature extraction level.
    #[serde(default = "default_feature_level")]
    pub feature_level: FeatureLevel,

    /// Network interface to capture on.
    #[validate(custom(function = validation::validate_interface))]
    #[serde(default = "default_interface")]
    pub network_interface: String,

    /// History buffer capacity in packets.
    #[validate(range(min = 100, max = 10000))]
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Per-packet analysis depth.
    #[serde(default = "default_analysis_depth")]
    pub analysis_depth: AnalysisDepth,

    /// Export encryption algorithm (cosmetic).
    #[serde(default = "default_encryption")]
    pub encryption_algorithm: EncryptionAlgorithm,

    /// Presentation-only dark mode toggle.
    #[serde(default)]
    pub dark_mode: bool,
}

fn default_ml_model() -> MlModel {
    MlModel::Both
}

fn default_feature_level() -> FeatureLevel {
    FeatureLevel::Standard
}

fn default_interface() -> String {
    "eth0".into()
}

fn default_buffer_size() -> usize {
    1000
}

fn default_analysis_depth() -> AnalysisDepth {
    AnalysisDepth::Intermediate
}

fn default_encryption() -> EncryptionAlgorithm {
    EncryptionAlgorithm::Aes256
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            ml_model: default_ml_model(),
            feature_level: default_feature_level(),
            network_interface: default_interface(),
            buffer_size: default_buffer_size(),
            analysis_depth: default_analysis_depth(),
            encryption_algorithm: default_encryption(),
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn default_config_validates() {
        MonitorConfig::default()
            .validate()
            .expect("default config should validate");
    }

    #[test]
    fn out_of_range_buffer_fails_validation() {
        let config = MonitorConfig {
            buffer_size: 50,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn enum_wire_names_match_control_surface() {
        let json = serde_json::to_string(&MonitorConfig::default()).unwrap();
        assert!(json.contains("\"ml_model\":\"both\""));
        assert!(json.contains("\"encryption_algorithm\":\"AES-256\""));
    }
}
