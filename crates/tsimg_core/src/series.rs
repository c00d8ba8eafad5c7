//! Validated univariate time series.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// An ordered, non-empty sequence of finite samples.
///
/// The value range is computed once at construction so transforms can
/// min-max normalize without rescanning the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesRepr", into = "SeriesRepr")]
pub struct Series {
    values: Vec<f64>,
    name: Option<String>,
    min: f64,
    max: f64,
}

impl Series {
    /// Create a series from raw samples.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptySeries`] for an empty vector and
    /// [`CoreError::NonFiniteValue`] if any sample is NaN or infinite.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(CoreError::EmptySeries);
        }
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::NonFiniteValue { position });
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            values,
            name: None,
            min,
            max,
        })
    }

    /// Create a series from one column of a samples x series table.
    pub fn from_column(column: ArrayView1<'_, f64>) -> Result<Self> {
        Self::new(column.to_vec())
    }

    /// Attach a display name (typically the column header).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; every constructor, deserialization included, rejects
    /// empty input.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples in time order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(min, max)` over all samples.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// True when every sample has the same value.
    pub fn is_constant(&self) -> bool {
        self.max == self.min
    }

    /// Min-max normalize `value` into `[0, 1]` against this series' range.
    ///
    /// A constant series has no spread, so every value normalizes to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_constant() {
            0.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }
}

/// Serialized form: only the samples and the name. The range is recomputed
/// on the way back in.
#[derive(Serialize, Deserialize)]
struct SeriesRepr {
    values: Vec<f64>,
    #[serde(default)]
    name: Option<String>,
}

impl From<Series> for SeriesRepr {
    fn from(series: Series) -> Self {
        Self {
            values: series.values,
            name: series.name,
        }
    }
}

impl TryFrom<SeriesRepr> for Series {
    type Error = CoreError;

    fn try_from(repr: SeriesRepr) -> Result<Self> {
        let series = Self::new(repr.values)?;
        Ok(match repr.name {
            Some(name) => series.with_name(name),
            None => series,
        })
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = CoreError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}
