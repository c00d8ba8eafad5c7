//! Block aggregation of square fields down to a smaller image size.

use ndarray::s;
use serde::{Deserialize, Serialize};
use tsimg_core::{CoreError, Matrix, Result};

/// Policy for sizes that do not divide the field length evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Require the length to be a multiple of the output size.
    #[default]
    Strict,
    /// Average over uneven contiguous segments (piecewise aggregate).
    Segment,
}

/// Segment boundaries splitting `length` indices into `size` contiguous parts.
///
/// Returns `size + 1` offsets; segment `k` is `bounds[k]..bounds[k + 1]`.
/// With `size <= length` every segment holds at least one index.
pub fn segment_bounds(length: usize, size: usize) -> Vec<usize> {
    (0..=size).map(|k| k * length / size).collect()
}

/// Reduce a square `N x N` matrix to `size x size` by averaging blocks.
///
/// # Errors
///
/// - [`CoreError::InvalidParameter`] if `size` is zero or `field` is not square
/// - [`CoreError::SizeMismatch`] if `size > N`, or if `N` is not a multiple of
///   `size` under [`ResizeMode::Strict`]
pub fn aggregate(field: &Matrix, size: usize, mode: ResizeMode) -> Result<Matrix> {
    let (rows, cols) = field.dim();
    if rows != cols {
        return Err(CoreError::InvalidParameter(format!(
            "expected a square field, got {rows}x{cols}"
        )));
    }
    if size == 0 {
        return Err(CoreError::InvalidParameter(
            "image size must be at least 1".to_string(),
        ));
    }
    if size > rows || (mode == ResizeMode::Strict && rows % size != 0) {
        return Err(CoreError::SizeMismatch { length: rows, size });
    }
    if size == rows {
        return Ok(field.clone());
    }

    let bounds = segment_bounds(rows, size);
    Ok(Matrix::from_shape_fn((size, size), |(i, j)| {
        field
            .slice(s![bounds[i]..bounds[i + 1], bounds[j]..bounds[j + 1]])
            .mean()
            .unwrap_or(0.0)
    }))
}
