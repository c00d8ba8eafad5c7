//! Error types for batch runs.

use std::path::PathBuf;

use thiserror::Error;
use tsimg_core::CoreError;
use tsimg_data::DataError;

/// Result type alias using [`BatchError`].
pub type Result<T> = std::result::Result<T, BatchError>;

/// Fatal errors that abort a whole run before any series is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Reading the input table or preparing output folders failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The run configuration file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The run configuration file is not valid JSON for [`crate::RunConfig`].
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Why a single series produced no (or incomplete) output.
#[derive(Error, Debug)]
pub enum SeriesError {
    /// The series could not be built or transformed.
    #[error(transparent)]
    Transform(#[from] CoreError),

    /// An image or data file could not be written.
    #[error(transparent)]
    Output(#[from] DataError),
}
