//! Partial configuration updates.
//!
//! The control surface sends sparse field sets; `merged` overlays them onto
//! the current record. The operation is total: numeric fields clamp into
//! their bounds and an interface name that fails validation is dropped, so
//! a single bad field never rejects an otherwise valid update and the store
//! never holds an invalid record.

use serde::{Deserialize, Serialize};

use netsentry_core::history::{MAX_CAPACITY, MIN_CAPACITY};

use crate::settings::{
    AnalysisDepth, EncryptionAlgorithm, FeatureLevel, MlModel, MonitorConfig,
};
use crate::validation;

/// A sparse overlay for [`MonitorConfig`]. Absent fields keep their current
/// value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_model: Option<MlModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_level: Option<FeatureLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_depth: Option<AnalysisDepth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<EncryptionAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self == &ConfigPatch::default()
    }
}

impl MonitorConfig {
    /// Overlays `patch` onto `self`, producing a new valid configuration.
    ///
    /// `buffer_size` clamps into `[MIN_CAPACITY, MAX_CAPACITY]`; an
    /// interface name that fails the naming rule is ignored.
    pub fn merged(&self, patch: &ConfigPatch) -> MonitorConfig {
        let mut next = self.clone();
        if let Some(model) = patch.ml_model {
            next.ml_model = model;
        }
        if let Some(level) = patch.feature_level {
            next.feature_level = level;
        }
        if let Some(interface) = &patch.network_interface {
            if validation::validate_interface(interface).is_ok() {
                next.network_interface = interface.clone();
            }
        }
        if let Some(size) = patch.buffer_size {
            next.buffer_size = size.clamp(MIN_CAPACITY, MAX_CAPACITY);
        }
        if let Some(depth) = patch.analysis_depth {
            next.analysis_depth = depth;
        }
        if let Some(algorithm) = patch.encryption_algorithm {
            next.encryption_algorithm = algorithm;
        }
        if let Some(dark_mode) = patch.dark_mode {
            next.dark_mode = dark_mode;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_identity() {
        let config = MonitorConfig::default();
        assert_eq!(config.merged(&ConfigPatch::default()), config);
    }

    #[test]
    fn patch_overlays_only_present_fields() {
        let config = MonitorConfig::default();
        let patch = ConfigPatch {
            ml_model: Some(MlModel::IsolationForest),
            buffer_size: Some(5000),
            ..ConfigPatch::default()
        };
        let next = config.merged(&patch);
        assert_eq!(next.ml_model, MlModel::IsolationForest);
        assert_eq!(next.buffer_size, 5000);
        assert_eq!(next.feature_level, config.feature_level);
        assert_eq!(next.network_interface, config.network_interface);
    }

    #[test]
    fn buffer_size_clamps_to_bounds() {
        let config = MonitorConfig::default();
        let shrunk = config.merged(&ConfigPatch {
            buffer_size: Some(1),
            ..ConfigPatch::default()
        });
        assert_eq!(shrunk.buffer_size, MIN_CAPACITY);
        let grown = config.merged(&ConfigPatch {
            buffer_size: Some(1_000_000),
            ..ConfigPatch::default()
        });
        assert_eq!(grown.buffer_size, MAX_CAPACITY);
    }

    #[test]
    fn invalid_interface_name_is_dropped() {
        let config = MonitorConfig::default();
        let next = config.merged(&ConfigPatch {
            network_interface: Some("bad/name!".into()),
            buffer_size: Some(2000),
            ..ConfigPatch::default()
        });
        // The bad field is ignored; the good one still lands.
        assert_eq!(next.network_interface, config.network_interface);
        assert_eq!(next.buffer_size, 2000);
    }

    #[test]
    fn patch_deserializes_from_sparse_json() {
        let patch: ConfigPatch =
            serde_json::from_str(r#"{"feature_level":"advanced","dark_mode":true}"#).unwrap();
        assert_eq!(patch.feature_level, Some(FeatureLevel::Advanced));
        assert_eq!(patch.dark_mode, Some(true));
        assert!(patch.ml_model.is_none());
    }
}
