//! Delimited-text export and output folder layout.

use std::path::{Path, PathBuf};

use tsimg_core::Matrix;
use tsimg_transforms::SdpPattern;

use crate::error::{DataError, Result};

/// Sub-folder of the output root holding rendered images.
pub const IMAGES_DIR: &str = "images";

/// Sub-folder of the output root holding raw data files.
pub const DATA_DIR: &str = "data";

/// Resolved output folders for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    /// Folder for `<index>.png` files.
    pub images: PathBuf,
    /// Folder for `<index>.csv` files.
    pub data: PathBuf,
}

impl OutputDirs {
    /// Create `images/` and `data/` under `root`. Existing folders are kept.
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let dirs = Self {
            images: root.join(IMAGES_DIR),
            data: root.join(DATA_DIR),
        };
        for dir in [&dirs.images, &dirs.data] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(dirs)
    }

    /// Image path for series `index`.
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.images.join(format!("{index}.png"))
    }

    /// Data path for series `index`.
    pub fn data_path(&self, index: usize) -> PathBuf {
        self.data.join(format!("{index}.csv"))
    }
}

/// Format a matrix as CSV: one line per row, comma-separated, no header.
pub fn matrix_to_csv(matrix: &Matrix) -> String {
    let mut output = String::with_capacity(matrix.len() * 20);
    for row in matrix.rows() {
        let line: Vec<String> = row.iter().map(f64::to_string).collect();
        output.push_str(&line.join(","));
        output.push('\n');
    }
    output
}

/// Format a pattern as CSV with one line per plotted point.
///
/// Columns: `sector,index,radius,clockwise,anticlockwise` (angles in radians).
pub fn pattern_to_csv(pattern: &SdpPattern) -> String {
    let mut output = String::from("sector,index,radius,clockwise,anticlockwise\n");
    for (k, sector) in pattern.sectors.iter().enumerate() {
        for i in 0..sector.len() {
            output.push_str(&format!(
                "{},{},{},{},{}\n",
                k, i, sector.radius[i], sector.clockwise[i], sector.anticlockwise[i]
            ));
        }
    }
    output
}

/// Write `contents` to `path`, reporting failures as [`DataError::OutputWrite`].
pub fn write_text<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents).map_err(|e| DataError::output_write(path, e))
}
