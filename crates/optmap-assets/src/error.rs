//! Error types for asset commands.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving, converting or writing assets.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Texture loading, transform or encoding error.
    #[error("{0}")]
    Texture(#[from] optmap_texture::Error),

    /// A file the command needs does not exist.
    #[error("failed to find corresponding texture: {}", .0.display())]
    MissingInput(PathBuf),

    /// A file name does not follow the channel naming rules.
    #[error("file name does not follow naming rules: {0}")]
    InvalidName(String),

    /// Preferences or import settings could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, Error>;
