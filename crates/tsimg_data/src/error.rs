//! Error types for tsimg_data.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading tables or writing artifacts.
#[derive(Error, Debug)]
pub enum DataError {
    /// The input table does not exist.
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// File format error.
    #[error("File format error: {0}")]
    FormatError(String),

    /// Invalid data shape.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Failed to persist an image or data file.
    #[error("Failed to write {}: {reason}", path.display())]
    OutputWrite {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Core error.
    #[error("Core error: {0}")]
    CoreError(#[from] tsimg_core::CoreError),
}

impl DataError {
    pub(crate) fn output_write(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::OutputWrite {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
