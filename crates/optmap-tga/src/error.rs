//! Error types for TGA decoding.

use thiserror::Error;

/// Errors that can occur when decoding TGA files.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error (reads past the end of the buffer).
    #[error("{0}")]
    Common(#[from] optmap_common::Error),

    /// Image type other than uncompressed or RLE true-color.
    #[error("unsupported TGA image type: {0}")]
    UnsupportedFormat(u8),

    /// Bits per pixel other than 24 or 32.
    #[error("unsupported TGA bits per pixel: {0}")]
    UnsupportedBitDepth(u8),

    /// Structurally invalid pixel data.
    #[error("malformed TGA data: {0}")]
    MalformedData(String),
}

impl Error {
    /// Check whether this error was caused by truncated or inconsistent data,
    /// as opposed to a well-formed but unsupported file.
    pub fn is_malformed(&self) -> bool {
        match self {
            Error::Common(e) => e.is_eof(),
            Error::MalformedData(_) => true,
            Error::UnsupportedFormat(_) | Error::UnsupportedBitDepth(_) => false,
        }
    }
}

/// Result type for TGA operations.
pub type Result<T> = std::result::Result<T, Error>;
