//! # Error Types
//!
//! This module defines error types used throughout the fontpack library.
//!
//! Every conversion failure is terminal and reported exactly once through
//! the task's result; there is no partial-success or retry path.

use thiserror::Error;

/// Main error type for fontpack operations
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Configuration rejected by the encoder (zero or out-of-range dimensions,
    /// or a grid too small to hold a single glyph cell)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Image could not be decoded, or decoded to an empty pixel grid
    #[error("Couldn't read image: {0}")]
    ImageLoad(String),

    /// Generator input mismatch (byte sequence inconsistent with the
    /// configured glyph geometry)
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Short machine-checkable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::InvalidConfiguration(_) => "InvalidConfiguration",
            ConvertError::ImageLoad(_) => "ImageLoadError",
            ConvertError::UnsupportedConfiguration(_) => "UnsupportedConfiguration",
            ConvertError::Io(_) => "IoError",
        }
    }

    /// One-line summary suitable for a dialog title or status line.
    pub fn summary(&self) -> &'static str {
        match self {
            ConvertError::InvalidConfiguration(_) => "Invalid font configuration",
            ConvertError::ImageLoad(_) => "Couldn't read image from provided file",
            ConvertError::UnsupportedConfiguration(_) => "Unsupported output configuration",
            ConvertError::Io(_) => "File access failed",
        }
    }

    /// Longer human-readable description (the display form).
    pub fn description(&self) -> String {
        self.to_string()
    }
}
