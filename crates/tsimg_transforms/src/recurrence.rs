//! Recurrence Plot transform.
//!
//! The series is delay-embedded into trajectory points
//! `(x[i], x[i + tau], ..., x[i + (d - 1) tau])` and the plot holds the
//! Euclidean distance between every pair of points. An optional threshold
//! turns the distances into a binary recurrence map.

use serde::{Deserialize, Serialize};
use tsimg_core::{CoreError, Matrix, Result, Series, SeriesTransform};

use crate::quantize::percentile;

/// Rule turning distances into binary recurrences.
///
/// A pair recurs (cell set to 1) when its distance is at most the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RecurrenceThreshold {
    /// Fixed distance threshold (epsilon).
    Fixed {
        /// Threshold distance.
        epsilon: f64,
    },
    /// Threshold as a percentage of the largest distance.
    Distance {
        /// Percentage in `[0, 100]`.
        percentage: f64,
    },
    /// Per-point threshold: each row keeps its closest `percentage` % of points.
    ///
    /// Rows use different thresholds, so the result is not symmetric in general.
    Point {
        /// Percentage in `[0, 100]`.
        percentage: f64,
    },
}

impl RecurrenceThreshold {
    fn validate(&self) -> Result<()> {
        match *self {
            Self::Fixed { epsilon } if epsilon.is_nan() || epsilon < 0.0 => {
                Err(CoreError::InvalidParameter(format!(
                    "threshold must be a non-negative number, got {epsilon}"
                )))
            }
            Self::Distance { percentage } | Self::Point { percentage }
                if !(0.0..=100.0).contains(&percentage) =>
            {
                Err(CoreError::InvalidParameter(format!(
                    "percentage must be within [0, 100], got {percentage}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Configuration for Recurrence Plot transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrencePlotConfig {
    /// Embedding dimension (coordinates per trajectory point).
    pub dimension: usize,
    /// Time delay between coordinates, in samples.
    pub time_delay: usize,
    /// Optional binarization; `None` keeps raw distances.
    pub threshold: Option<RecurrenceThreshold>,
}

impl Default for RecurrencePlotConfig {
    fn default() -> Self {
        Self {
            dimension: 7,
            time_delay: 10,
            threshold: None,
        }
    }
}

/// Converts time series to Recurrence Plot images.
///
/// A recurrence plot visualizes the times at which a dynamical system
/// returns to a state it has visited before.
#[derive(Debug, Clone, Default)]
pub struct TSToRP {
    config: RecurrencePlotConfig,
}

impl TSToRP {
    /// Create a new Recurrence Plot transform.
    #[must_use]
    pub fn new(dimension: usize, time_delay: usize) -> Self {
        Self {
            config: RecurrencePlotConfig {
                dimension,
                time_delay,
                threshold: None,
            },
        }
    }

    /// Create from config.
    #[must_use]
    pub fn from_config(config: RecurrencePlotConfig) -> Self {
        Self { config }
    }

    /// Set the binarization threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: RecurrenceThreshold) -> Self {
        self.config.threshold = Some(threshold);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &RecurrencePlotConfig {
        &self.config
    }

    /// Apply the configured threshold to a distance matrix.
    fn binarize(&self, distances: Matrix) -> Matrix {
        let Some(threshold) = self.config.threshold else {
            return distances;
        };

        match threshold {
            RecurrenceThreshold::Fixed { epsilon } => recur_below(distances, epsilon),
            RecurrenceThreshold::Distance { percentage } => {
                let max_dist = distances.iter().copied().fold(0.0f64, f64::max);
                recur_below(distances, percentage / 100.0 * max_dist)
            }
            RecurrenceThreshold::Point { percentage } => {
                let mut plot = distances;
                for mut row in plot.rows_mut() {
                    let mut sorted = row.to_vec();
                    sorted.sort_by(f64::total_cmp);
                    let eps = percentile(&sorted, percentage);
                    row.mapv_inplace(|d| if d <= eps { 1.0 } else { 0.0 });
                }
                plot
            }
        }
    }
}

impl SeriesTransform for TSToRP {
    type Output = Matrix;

    fn transform(&self, series: &Series) -> Result<Matrix> {
        if let Some(threshold) = &self.config.threshold {
            threshold.validate()?;
        }
        let trajectories = delay_embedding(series, self.config.dimension, self.config.time_delay)?;
        Ok(self.binarize(pairwise_distances(&trajectories)))
    }

    fn name(&self) -> &str {
        "RP"
    }
}

/// Delay-embed a series into an `M x dimension` matrix of trajectory points,
/// where `M = N - (dimension - 1) * time_delay`.
///
/// # Errors
///
/// - [`CoreError::InvalidParameter`] if `dimension` or `time_delay` is zero
/// - [`CoreError::InsufficientLength`] if no trajectory point fits in the series
pub fn delay_embedding(series: &Series, dimension: usize, time_delay: usize) -> Result<Matrix> {
    if dimension == 0 || time_delay == 0 {
        return Err(CoreError::InvalidParameter(format!(
            "dimension and time delay must be at least 1, got {dimension} and {time_delay}"
        )));
    }

    let n = series.len();
    let span = (dimension - 1)
        .checked_mul(time_delay)
        .filter(|&span| span < n)
        .ok_or_else(|| CoreError::InsufficientLength {
            required: (dimension - 1).saturating_mul(time_delay).saturating_add(1),
            actual: n,
        })?;

    let x = series.values();
    Ok(Matrix::from_shape_fn((n - span, dimension), |(i, k)| {
        x[i + k * time_delay]
    }))
}

/// Euclidean distance between every pair of rows.
///
/// The result is symmetric with a zero diagonal.
pub fn pairwise_distances(points: &Matrix) -> Matrix {
    let m = points.nrows();
    let mut distances = Matrix::zeros((m, m));
    for i in 0..m {
        for j in (i + 1)..m {
            let d = points
                .row(i)
                .iter()
                .zip(points.row(j).iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            distances[[i, j]] = d;
            distances[[j, i]] = d;
        }
    }
    distances
}

fn recur_below(mut distances: Matrix, eps: f64) -> Matrix {
    distances.mapv_inplace(|d| if d <= eps { 1.0 } else { 0.0 });
    distances
}
