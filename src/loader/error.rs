//! Error types for scan and label loading.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for loader operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// The resolver passes these through to its caller unchanged.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the source file.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its contents are not a valid matrix.
    #[error("Malformed matrix in '{}' at line {line}: {reason}", path.display())]
    Parse {
        /// Path of the malformed file
        path: PathBuf,
        /// 1-based line number of the offending row
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Error raised by a caller-provided loader implementation.
    #[error("Loader error: {0}")]
    Custom(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LoadError {
    /// Wraps an arbitrary error from a caller-provided loader.
    pub fn custom(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(error.into())
    }
}
