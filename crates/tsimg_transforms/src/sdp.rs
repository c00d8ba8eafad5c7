//! Symmetrized Dot Pattern transform.
//!
//! Each sample becomes a polar point whose radius is the normalized sample
//! and whose angle is deflected by the normalized sample `lag` steps later.
//! The pattern is mirrored around six base angles 60 degrees apart, giving a
//! snowflake-like figure instead of a dense matrix.

use serde::{Deserialize, Serialize};
use tsimg_core::{CoreError, Result, Series, SeriesTransform};

/// Number of mirrored sectors in a pattern.
pub const SDP_SECTORS: usize = 6;

/// Angular spacing between sector base angles, in degrees.
const SECTOR_SPACING_DEG: f64 = 360.0 / SDP_SECTORS as f64;

/// Configuration for Symmetrized Dot Pattern transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SDPConfig {
    /// Base angle of the first sector, in degrees.
    pub start_angle: f64,
    /// Angular gain applied to the lagged sample, in degrees.
    pub xi: f64,
    /// Lag between the radius sample and the angle sample.
    pub lag: usize,
}

impl Default for SDPConfig {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            xi: 50.0,
            lag: 9,
        }
    }
}

/// One mirrored arm of a pattern.
///
/// `radius`, `clockwise` and `anticlockwise` have the same length; point `i`
/// is plotted at `(clockwise[i], radius[i])` and `(anticlockwise[i], radius[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdpSector {
    /// Base angle of this sector, in radians.
    pub base_angle: f64,
    /// Normalized radius per point.
    pub radius: Vec<f64>,
    /// Angle deflected clockwise from the base, in radians.
    pub clockwise: Vec<f64>,
    /// Angle deflected anticlockwise from the base, in radians.
    pub anticlockwise: Vec<f64>,
}

impl SdpSector {
    /// Number of points in this sector.
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    /// True if the sector has no points.
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }
}

/// Six-sector polar point cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdpPattern {
    /// Sectors in order of increasing base angle.
    pub sectors: Vec<SdpSector>,
}

impl SdpPattern {
    /// Points per sector.
    pub fn points_per_sector(&self) -> usize {
        self.sectors.first().map_or(0, SdpSector::len)
    }
}

/// Converts time series to Symmetrized Dot Patterns.
#[derive(Debug, Clone, Default)]
pub struct TSToSDP {
    config: SDPConfig,
}

impl TSToSDP {
    /// Create a new SDP transform. Angles are in degrees.
    #[must_use]
    pub fn new(start_angle: f64, xi: f64, lag: usize) -> Self {
        Self {
            config: SDPConfig {
                start_angle,
                xi,
                lag,
            },
        }
    }

    /// Create from config.
    #[must_use]
    pub fn from_config(config: SDPConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SDPConfig {
        &self.config
    }
}

impl SeriesTransform for TSToSDP {
    type Output = SdpPattern;

    fn transform(&self, series: &Series) -> Result<SdpPattern> {
        let SDPConfig {
            start_angle,
            xi,
            lag,
        } = self.config;

        if !start_angle.is_finite() || !xi.is_finite() {
            return Err(CoreError::InvalidParameter(format!(
                "angles must be finite, got start_angle={start_angle} xi={xi}"
            )));
        }

        let n = series.len();
        if lag >= n {
            return Err(CoreError::InsufficientLength {
                required: lag.saturating_add(1),
                actual: n,
            });
        }

        let xi = xi.to_radians();
        let x = series.values();
        let radius: Vec<f64> = x[..n - lag].iter().map(|&v| series.normalize(v)).collect();
        let delta: Vec<f64> = x[lag..].iter().map(|&v| series.normalize(v) * xi).collect();

        let sectors = (0..SDP_SECTORS)
            .map(|k| {
                let theta = (start_angle + SECTOR_SPACING_DEG * k as f64).to_radians();
                SdpSector {
                    base_angle: theta,
                    radius: radius.clone(),
                    clockwise: delta.iter().map(|d| theta + d).collect(),
                    anticlockwise: delta.iter().map(|d| theta - d).collect(),
                }
            })
            .collect();

        Ok(SdpPattern { sectors })
    }

    fn name(&self) -> &str {
        "SDP"
    }
}
