//! Error types for configuration handling.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Recoverable: the node references a map that no document defines.
    /// Callers log it and treat the node as producing no artifacts.
    #[error("Resource map '{0}' not found in configuration")]
    ResourceMapNotFound(String),

    /// Fatal: a matched definition is malformed.
    #[error("Definition '{definition}' is missing mandatory field '{field}'")]
    MissingField {
        definition: String,
        field: &'static str,
    },

    #[error("Configuration directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// True for the not-found class of errors that callers downgrade to a
    /// warning instead of aborting generation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConfigError::ResourceMapNotFound(_))
    }
}
