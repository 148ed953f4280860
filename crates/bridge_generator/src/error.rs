//! Error types for resource generation.

use thiserror::Error;

use bridge_config::ConfigError;

/// Result type alias for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can abort a generation walk.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The walk was aborted by a cancellation request. Distinct from a
    /// failure so callers can skip failure handling; nodes processed
    /// before the cancellation keep their attachments.
    #[error("Resource generation was cancelled")]
    Cancelled,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
