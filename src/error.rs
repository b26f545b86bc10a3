//! # Error Types
//!
//! Every stage of splash generation reports failures through [`SplashError`].
//! Variants name the stage that failed and carry the offending path or value
//! so the CLI can print a single useful line.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for splash generation
#[derive(Debug, Error)]
pub enum SplashError {
    /// Background image missing, unreadable or not decodable
    #[error("Image load error: {}: {reason}", path.display())]
    ImageLoad { path: PathBuf, reason: String },

    /// Output image could not be encoded or written
    #[error("Image write error: {}: {reason}", path.display())]
    ImageWrite { path: PathBuf, reason: String },

    /// Markup, text metrics or placement cannot produce a drawable block
    #[error("Layout error: {0}")]
    Layout(String),

    /// No usable font face could be resolved
    #[error("Font error: {0}")]
    Font(String),

    /// Malformed command-line invocation
    #[error("Argument error: {0}")]
    Argument(String),

    /// Branding configuration file could not be read or parsed
    #[error("Config error: {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl SplashError {
    pub(crate) fn image_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ImageLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn image_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ImageWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
