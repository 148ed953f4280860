//! Error types for template rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering templates.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Template file not found: {0}")]
    TemplateFileNotFound(PathBuf),

    #[error("Template directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to serialize render scope: {0}")]
    Scope(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
