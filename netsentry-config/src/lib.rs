//! # Netsentry Configuration System
//!
//! Capture and detection configuration for the telemetry engine.
//!
//! ## Features
//! - **Single record**: one process-wide configuration consumed by every
//!   component, mutated only through a total merge operation
//! - **Validation**: typed enum domains plus runtime validation of bounded
//!   and free-form fields
//! - **Environment awareness**: file and `NETSENTRY_*` environment overrides

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use validator::Validate;

mod error;
mod patch;
mod settings;
pub mod validation;

pub use error::ConfigError;
pub use patch::ConfigPatch;
pub use settings::{
    AnalysisDepth, EncryptionAlgorithm, FeatureLevel, MlModel, MonitorConfig,
};

impl MonitorConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/netsentry.yaml` — base settings. If missing, defaults are used.
    /// 3. `NETSENTRY_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(MonitorConfig::default()));

        if Path::new("config/netsentry.yaml").exists() {
            figment = figment.merge(Yaml::file("config/netsentry.yaml"));
        } else {
            println!("config/netsentry.yaml not found, using default configuration");
        }

        figment
            .merge(Env::prefixed("NETSENTRY_"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(MonitorConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("NETSENTRY_"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_reports_file_not_found() {
        let err = MonitorConfig::load_from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn yaml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "netsentry.yaml",
                r#"
                ml_model: isolation_forest
                buffer_size: 2500
                "#,
            )?;
            let config = MonitorConfig::load_from_path("netsentry.yaml").expect("load");
            assert_eq!(config.ml_model, MlModel::IsolationForest);
            assert_eq!(config.buffer_size, 2500);
            // Untouched fields keep their defaults.
            assert_eq!(config.network_interface, "eth0");
            Ok(())
        });
    }

    #[test]
    fn invalid_yaml_value_fails_validation() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("netsentry.yaml", "buffer_size: 7")?;
            let err = MonitorConfig::load_from_path("netsentry.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            Ok(())
        });
    }
}
