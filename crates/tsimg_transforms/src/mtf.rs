//! Markov Transition Field transform.
//!
//! A series is quantized into bins, the lag-1 transitions between bins are
//! counted into a row-stochastic matrix, and the field spreads those
//! probabilities over every pair of time positions:
//! `field[i][j] = T[bin(x[i])][bin(x[j])]`.

use serde::{Deserialize, Serialize};
use tsimg_core::{Matrix, Result, Series, SeriesTransform};

use crate::aggregate::{aggregate, ResizeMode};
use crate::quantize::{BinStrategy, QuantizationScheme};

/// Configuration for Markov Transition Field transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MTFConfig {
    /// Size of the output image. `None` keeps the full `N x N` field.
    pub image_size: Option<usize>,
    /// Number of bins.
    pub n_bins: usize,
    /// Bin placement strategy.
    pub strategy: BinStrategy,
    /// How to handle image sizes that do not divide the series length.
    pub resize: ResizeMode,
}

impl Default for MTFConfig {
    fn default() -> Self {
        Self {
            image_size: None,
            n_bins: 5,
            strategy: BinStrategy::Quantile,
            resize: ResizeMode::Strict,
        }
    }
}

/// Converts time series to Markov Transition Field images.
///
/// MTF encodes the transition probabilities between value bins.
#[derive(Debug, Clone, Default)]
pub struct TSToMTF {
    config: MTFConfig,
}

impl TSToMTF {
    /// Create a new MTF transform producing `size x size` images.
    #[must_use]
    pub fn new(size: usize, n_bins: usize) -> Self {
        Self {
            config: MTFConfig {
                image_size: Some(size),
                n_bins,
                ..Default::default()
            },
        }
    }

    /// Create from config.
    #[must_use]
    pub fn from_config(config: MTFConfig) -> Self {
        Self { config }
    }

    /// Set the bin strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: BinStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the resize policy.
    #[must_use]
    pub fn with_resize(mut self, resize: ResizeMode) -> Self {
        self.config.resize = resize;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &MTFConfig {
        &self.config
    }

    /// Compute the full-resolution `N x N` field without aggregation.
    pub fn field(&self, series: &Series) -> Result<Matrix> {
        let scheme = QuantizationScheme::fit(series, self.config.n_bins, self.config.strategy)?;
        let bins = scheme.assign(series);
        let transitions = transition_matrix(&bins, scheme.n_bins());
        Ok(markov_field(&bins, &transitions))
    }
}

impl SeriesTransform for TSToMTF {
    type Output = Matrix;

    fn transform(&self, series: &Series) -> Result<Matrix> {
        let field = self.field(series)?;
        match self.config.image_size {
            Some(size) => aggregate(&field, size, self.config.resize),
            None => Ok(field),
        }
    }

    fn name(&self) -> &str {
        "MTF"
    }
}

/// Lag-1 transition probabilities between bins.
///
/// Row `p` holds the empirical distribution of the bin that follows bin `p`.
/// Rows for bins never seen as a predecessor stay all zero.
///
/// Every entry of `bins` must be below `n_bins`.
pub fn transition_matrix(bins: &[usize], n_bins: usize) -> Matrix {
    let mut counts = Matrix::zeros((n_bins, n_bins));
    for pair in bins.windows(2) {
        counts[[pair[0], pair[1]]] += 1.0;
    }

    for mut row in counts.rows_mut() {
        let total = row.sum();
        if total > 0.0 {
            row /= total;
        }
    }
    counts
}

/// Spread a transition matrix over all pairs of time positions.
pub fn markov_field(bins: &[usize], transitions: &Matrix) -> Matrix {
    let n = bins.len();
    Matrix::from_shape_fn((n, n), |(i, j)| transitions[[bins[i], bins[j]]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use tsimg_core::CoreError;

    fn series(values: &[f64]) -> Series {
        Series::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_five_point_ramp_two_uniform_bins() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let scheme = QuantizationScheme::fit(&s, 2, BinStrategy::Uniform).unwrap();
        let bins = scheme.assign(&s);
        assert_eq!(bins, vec![0, 0, 0, 1, 1]);

        let t = transition_matrix(&bins, 2);
        assert!((t[[0, 0]] - 2.0 / 3.0).abs() < 1e-12);
        assert!((t[[0, 1]] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(t[[1, 0]], 0.0);
        assert_eq!(t[[1, 1]], 1.0);

        let mtf = TSToMTF::from_config(MTFConfig {
            n_bins: 2,
            strategy: BinStrategy::Uniform,
            ..Default::default()
        });
        let field = mtf.transform(&s).unwrap();
        assert_eq!(field.dim(), (5, 5));
        assert_eq!(field[[0, 4]], t[[0, 1]]);
        assert_eq!(field[[4, 0]], 0.0);
        assert_eq!(field[[1, 2]], t[[0, 0]]);
        assert_eq!(field[[3, 4]], 1.0);
    }

    #[test]
    fn test_transition_rows_sum_to_one_or_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let values: Vec<f64> = (0..200).map(|_| rng.gen::<f64>() * 10.0 - 5.0).collect();
        let s = series(&values);

        for n_bins in [1, 2, 3, 5, 8, 16] {
            for strategy in [BinStrategy::Uniform, BinStrategy::Quantile] {
                let scheme = QuantizationScheme::fit(&s, n_bins, strategy).unwrap();
                let t = transition_matrix(&scheme.assign(&s), n_bins);
                for row in t.rows() {
                    let sum = row.sum();
                    assert!(
                        (sum - 1.0).abs() < 1e-9 || sum == 0.0,
                        "row sum {sum} for {n_bins} bins"
                    );
                }
            }
        }
    }

    #[test]
    fn test_unobserved_predecessor_row_is_zero() {
        // bin 2 only appears as the last sample
        let t = transition_matrix(&[0, 1, 0, 1, 2], 3);
        assert_eq!(t.row(2).sum(), 0.0);
        assert_eq!(t[[0, 1]], 1.0);
    }

    #[test]
    fn test_constant_series_gives_uniform_ones() {
        let s = series(&[4.2; 12]);
        let field = TSToMTF::new(4, 5).transform(&s).unwrap();
        assert_eq!(field.dim(), (4, 4));
        assert!(field.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_single_bin_gives_all_ones() {
        let s = series(&[3.0, -1.0, 8.0, 0.5]);
        let mtf = TSToMTF::from_config(MTFConfig {
            n_bins: 1,
            ..Default::default()
        });
        let field = mtf.transform(&s).unwrap();
        assert!(field.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_single_sample_has_no_transitions() {
        let s = series(&[1.0]);
        let field = TSToMTF::default().transform(&s).unwrap();
        assert_eq!(field.dim(), (1, 1));
        assert_eq!(field[[0, 0]], 0.0);
    }

    #[test]
    fn test_resize_to_image_size() {
        let values: Vec<f64> = (0..12).map(|i| (i as f64 * 0.7).sin()).collect();
        let s = series(&values);
        let mtf = TSToMTF::new(4, 3);
        let full = mtf.field(&s).unwrap();
        let image = mtf.transform(&s).unwrap();
        assert_eq!(image.dim(), (4, 4));

        let block = full.slice(ndarray::s![0..3, 3..6]).mean().unwrap();
        assert!((image[[0, 1]] - block).abs() < 1e-12);
    }

    #[test]
    fn test_uneven_size_is_size_mismatch() {
        let s = series(&[1.0, 5.0, 2.0, 4.0, 3.0, 0.0, 2.0]);
        let err = TSToMTF::new(3, 2).transform(&s).unwrap_err();
        assert_eq!(err, CoreError::SizeMismatch { length: 7, size: 3 });

        let segmented = TSToMTF::new(3, 2)
            .with_resize(ResizeMode::Segment)
            .transform(&s)
            .unwrap();
        assert_eq!(segmented.dim(), (3, 3));
    }

    #[test]
    fn test_repeatable() {
        let s = series(&[0.1, 0.9, 0.4, 0.4, 0.8, 0.2, 0.6, 0.3]);
        let mtf = TSToMTF::new(4, 4);
        assert_eq!(mtf.transform(&s).unwrap(), mtf.transform(&s).unwrap());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: MTFConfig = serde_json::from_str(r#"{"image_size": 32}"#).unwrap();
        assert_eq!(config.image_size, Some(32));
        assert_eq!(config.n_bins, 5);
        assert_eq!(config.strategy, BinStrategy::Quantile);
        assert_eq!(config.resize, ResizeMode::Strict);
    }
}
