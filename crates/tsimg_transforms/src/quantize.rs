//! Value-range quantization used by the Markov Transition Field.

use serde::{Deserialize, Serialize};
use tsimg_core::{CoreError, Result, Series};

/// How bin edges are placed over the value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinStrategy {
    /// Equal-width bins between the series minimum and maximum.
    Uniform,
    /// Equal-frequency bins whose edges are sample percentiles.
    #[default]
    Quantile,
}

/// A partition of a series' value range into contiguous bins.
///
/// Only the interior edges are stored. A value's bin is the number of
/// interior edges strictly below it: bin `k` covers `(edge[k-1], edge[k]]`,
/// the minimum always lands in bin 0 and the maximum in the last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizationScheme {
    edges: Vec<f64>,
    n_bins: usize,
    constant: bool,
}

impl QuantizationScheme {
    /// Fit a scheme with `n_bins` bins to the given series.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidParameter`] when `n_bins` is zero.
    pub fn fit(series: &Series, n_bins: usize, strategy: BinStrategy) -> Result<Self> {
        if n_bins == 0 {
            return Err(CoreError::InvalidParameter(
                "number of bins must be at least 1".to_string(),
            ));
        }

        let (min, max) = series.range();
        let edges = match strategy {
            BinStrategy::Uniform => {
                let width = (max - min) / n_bins as f64;
                (1..n_bins).map(|k| min + width * k as f64).collect()
            }
            BinStrategy::Quantile => {
                let mut sorted = series.values().to_vec();
                sorted.sort_by(f64::total_cmp);
                (1..n_bins)
                    .map(|k| percentile(&sorted, 100.0 * k as f64 / n_bins as f64))
                    .collect()
            }
        };

        Ok(Self {
            edges,
            n_bins,
            constant: series.is_constant(),
        })
    }

    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Interior bin edges in ascending order.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bin index of a single value, always in `[0, n_bins)`.
    pub fn bin(&self, value: f64) -> usize {
        if self.constant {
            return 0;
        }
        self.edges.partition_point(|&edge| edge < value)
    }

    /// Bin index of every sample in time order.
    pub fn assign(&self, series: &Series) -> Vec<usize> {
        series.values().iter().map(|&v| self.bin(v)).collect()
    }
}

/// Percentile of already sorted data with linear interpolation between
/// neighbouring order statistics.
pub(crate) fn percentile(sorted: &[f64], pct: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (pct / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Series {
        Series::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_uniform_edge_value_closes_lower_bin() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let scheme = QuantizationScheme::fit(&s, 2, BinStrategy::Uniform).unwrap();
        assert_eq!(scheme.edges(), &[3.0]);
        assert_eq!(scheme.assign(&s), vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_maximum_lands_in_last_bin() {
        let s = series(&[0.0, 10.0]);
        let scheme = QuantizationScheme::fit(&s, 4, BinStrategy::Uniform).unwrap();
        assert_eq!(scheme.bin(10.0), 3);
        assert_eq!(scheme.bin(0.0), 0);
    }

    #[test]
    fn test_quantile_edges() {
        let s = series(&[4.0, 1.0, 3.0, 2.0, 5.0]);
        let scheme = QuantizationScheme::fit(&s, 4, BinStrategy::Quantile).unwrap();
        assert_eq!(scheme.edges(), &[2.0, 3.0, 4.0]);
        assert_eq!(scheme.assign(&s), vec![2, 0, 1, 0, 3]);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&sorted, 50.0) - 2.5).abs() < 1e-12);
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
    }

    #[test]
    fn test_constant_series_maps_to_bin_zero() {
        let s = series(&[7.0; 6]);
        for strategy in [BinStrategy::Uniform, BinStrategy::Quantile] {
            let scheme = QuantizationScheme::fit(&s, 5, strategy).unwrap();
            assert!(scheme.assign(&s).iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_bins_stay_in_range() {
        let s = series(&[0.3, -1.2, 8.5, 8.5, 2.0, -1.2, 4.4, 0.0]);
        for strategy in [BinStrategy::Uniform, BinStrategy::Quantile] {
            let scheme = QuantizationScheme::fit(&s, 3, strategy).unwrap();
            assert!(scheme.assign(&s).iter().all(|&b| b < 3));
        }
    }

    #[test]
    fn test_zero_bins_rejected() {
        let s = series(&[1.0, 2.0]);
        assert!(matches!(
            QuantizationScheme::fit(&s, 0, BinStrategy::Uniform),
            Err(CoreError::InvalidParameter(_))
        ));
    }
}
