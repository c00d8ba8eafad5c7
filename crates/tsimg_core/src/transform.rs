//! Transform trait for series imaging.

use crate::error::Result;
use crate::series::Series;

/// A transform that maps one series to an image-like structure.
///
/// Transforms are the primary mechanism for imaging in tsimg. Each one owns
/// its parameters and is applied independently to every series of a table.
///
/// # Implementation Notes
///
/// - Transforms must be pure: the same series and parameters give the same output
/// - Transforms should return `Result` instead of panicking
/// - Transforms must not mutate their input
///
/// # Example
///
/// ```rust,ignore
/// use tsimg_core::{Matrix, Result, Series, SeriesTransform};
///
/// struct Identity;
///
/// impl SeriesTransform for Identity {
///     type Output = Vec<f64>;
///
///     fn transform(&self, series: &Series) -> Result<Vec<f64>> {
///         Ok(series.values().to_vec())
///     }
/// }
/// ```
pub trait SeriesTransform: Send + Sync {
    /// Output produced for one series.
    type Output: Send;

    /// Apply the transform to a series.
    ///
    /// # Arguments
    ///
    /// * `series` - The input series
    ///
    /// # Returns
    ///
    /// The transformed output, or an error if the series does not fit the
    /// transform's parameters.
    fn transform(&self, series: &Series) -> Result<Self::Output>;

    /// Get the name of this transform for logging/debugging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
