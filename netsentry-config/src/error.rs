use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Configuration extraction failed: {0}")]
    Figment(#[from] figment::Error),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
