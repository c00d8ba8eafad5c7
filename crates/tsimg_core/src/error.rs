//! Error types for tsimg_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building a series or running a transform on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The series has no samples.
    #[error("Series is empty")]
    EmptySeries,

    /// The series contains a NaN or infinite sample.
    #[error("Non-finite value at position {position}")]
    NonFiniteValue {
        /// Index of the offending sample.
        position: usize,
    },

    /// The series is too short for the requested embedding or lag.
    #[error("Insufficient length: need at least {required} samples, got {actual}")]
    InsufficientLength {
        /// Minimum number of samples needed.
        required: usize,
        /// Number of samples available.
        actual: usize,
    },

    /// The requested output size cannot be produced from the series length.
    #[error("Size mismatch: cannot aggregate length {length} into {size}x{size}")]
    SizeMismatch {
        /// Natural size of the field (series length).
        length: usize,
        /// Requested output size.
        size: usize,
    },

    /// A transform parameter is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
