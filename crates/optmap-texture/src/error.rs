//! Error types for texture processing.

use thiserror::Error;

/// Errors that can occur while loading, transforming or encoding textures.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown file extension, or a TGA variant the decoder does not handle.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Merge inputs do not share the same dimensions.
    #[error("texture sizes don't match: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Truncated or inconsistent image data.
    #[error("malformed image data: {0}")]
    MalformedData(String),

    /// Error reported by the PNG/JPEG/TGA codec.
    #[error("codec error: {0}")]
    Codec(#[from] image::ImageError),
}

impl From<optmap_tga::Error> for Error {
    fn from(err: optmap_tga::Error) -> Self {
        match err {
            optmap_tga::Error::UnsupportedFormat(_) | optmap_tga::Error::UnsupportedBitDepth(_) => {
                Error::UnsupportedFormat(err.to_string())
            }
            other => Error::MalformedData(other.to_string()),
        }
    }
}

/// Result type for texture operations.
pub type Result<T> = std::result::Result<T, Error>;
