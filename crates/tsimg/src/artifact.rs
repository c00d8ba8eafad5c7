//! Persistable transform outputs.

use image::RgbImage;
use tsimg_core::Matrix;
use tsimg_data::{matrix_to_csv, matrix_to_image, pattern_to_csv, pattern_to_image};
use tsimg_transforms::{SdpPattern, SDP_SECTORS};

use crate::config::OutputConfig;

/// A transform output that can be rendered and exported.
pub trait Artifact {
    /// Raster rendering of the output.
    fn render(&self, output: &OutputConfig) -> RgbImage;

    /// Raw values as delimited text.
    fn to_csv(&self) -> String;

    /// `(rows, columns)` of a matrix, or `(sectors, points per sector)` of a pattern.
    fn dims(&self) -> (usize, usize);
}

impl Artifact for Matrix {
    fn render(&self, _output: &OutputConfig) -> RgbImage {
        matrix_to_image(self)
    }

    fn to_csv(&self) -> String {
        matrix_to_csv(self)
    }

    fn dims(&self) -> (usize, usize) {
        self.dim()
    }
}

impl Artifact for SdpPattern {
    fn render(&self, output: &OutputConfig) -> RgbImage {
        pattern_to_image(self, &output.polar_style())
    }

    fn to_csv(&self) -> String {
        pattern_to_csv(self)
    }

    fn dims(&self) -> (usize, usize) {
        (SDP_SECTORS, self.points_per_sector())
    }
}
