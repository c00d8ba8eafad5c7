//! Raster rendering of transform outputs.
//!
//! Matrices become one pixel per cell through a viridis colour map.
//! Symmetrized Dot Patterns are drawn as polar line traces on a square canvas.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use tsimg_core::Matrix;
use tsimg_transforms::SdpPattern;

use crate::error::{DataError, Result};

/// Viridis anchor colours at evenly spaced positions in `[0, 1]`.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// Map a value in `[0, 1]` to a viridis colour. Out-of-range values are clamped.
pub fn viridis(value: f64) -> Rgb<u8> {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let pos = v * (VIRIDIS.len() - 1) as f64;
    let lo = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let t = pos - lo as f64;

    let mut rgb = [0u8; 3];
    for (c, channel) in rgb.iter_mut().enumerate() {
        let a = VIRIDIS[lo][c] as f64;
        let b = VIRIDIS[lo + 1][c] as f64;
        *channel = (a + (b - a) * t).round() as u8;
    }
    Rgb(rgb)
}

/// Render a matrix as an image with one pixel per cell.
///
/// Values are min-max normalized before colour mapping; a constant matrix
/// maps entirely to the lowest colour. Row 0 is the top of the image.
pub fn matrix_to_image(matrix: &Matrix) -> RgbImage {
    let (rows, cols) = matrix.dim();
    let min = matrix.iter().copied().fold(f64::INFINITY, f64::min);
    let max = matrix.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
        let value = matrix[[y as usize, x as usize]];
        if range > 0.0 {
            viridis((value - min) / range)
        } else {
            viridis(0.0)
        }
    })
}

/// Styling for polar pattern plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarStyle {
    /// Width and height of the square canvas in pixels.
    pub canvas_size: u32,
    /// Stroke width in pixels.
    pub line_width: f64,
    /// Stroke colour.
    pub color: Rgb<u8>,
    /// Canvas colour.
    pub background: Rgb<u8>,
    /// Fraction of the half-width used for radius 1.
    pub fill: f64,
}

impl Default for PolarStyle {
    fn default() -> Self {
        Self {
            canvas_size: 600,
            line_width: 3.0,
            color: Rgb([0, 0, 255]),
            background: Rgb([255, 255, 255]),
            fill: 0.9,
        }
    }
}

/// Render a Symmetrized Dot Pattern.
///
/// For every sector both angle traces are drawn as connected polylines
/// through `(angle[i], radius[i])`. Angle 0 points right and angles grow
/// counter-clockwise.
pub fn pattern_to_image(pattern: &SdpPattern, style: &PolarStyle) -> RgbImage {
    let mut img = RgbImage::from_pixel(style.canvas_size, style.canvas_size, style.background);
    let center = style.canvas_size as f64 / 2.0;
    let scale = center * style.fill;

    let to_pixel = |angle: f64, radius: f64| {
        (
            center + radius * scale * angle.cos(),
            center - radius * scale * angle.sin(),
        )
    };

    for sector in &pattern.sectors {
        for trace in [&sector.clockwise, &sector.anticlockwise] {
            let points: Vec<(f64, f64)> = trace
                .iter()
                .zip(&sector.radius)
                .map(|(&a, &r)| to_pixel(a, r))
                .collect();

            match points.as_slice() {
                [] => {}
                [only] => stamp(&mut img, *only, style),
                _ => {
                    for segment in points.windows(2) {
                        draw_segment(&mut img, segment[0], segment[1], style);
                    }
                }
            }
        }
    }

    img
}

/// Save an image as PNG.
pub fn save_png<P: AsRef<Path>>(img: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| DataError::output_write(path, e))
}

fn draw_segment(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), style: &PolarStyle) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        stamp(img, (from.0 + dx * t, from.1 + dy * t), style);
    }
}

/// Paint a filled disc of diameter `line_width` centred on `at`.
fn stamp(img: &mut RgbImage, at: (f64, f64), style: &PolarStyle) {
    let half = (style.line_width / 2.0).max(0.5);
    let (w, h) = (img.width() as i64, img.height() as i64);

    let x0 = (at.0 - half).floor() as i64;
    let x1 = (at.0 + half).ceil() as i64;
    let y0 = (at.1 - half).floor() as i64;
    let y1 = (at.1 + half).ceil() as i64;

    for y in y0.max(0)..=y1.min(h - 1) {
        for x in x0.max(0)..=x1.min(w - 1) {
            let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
            if (cx - at.0).powi(2) + (cy - at.1).powi(2) <= half * half {
                img.put_pixel(x as u32, y as u32, style.color);
            }
        }
    }
}
