//! # tsimg_data
//!
//! Table ingestion and artifact export for tsimg.
//!
//! This crate provides:
//! - [`Table`] for a `(n_samples, n_series)` block of time series
//! - Readers for CSV, NPY and Excel tables ([`read_table`])
//! - CSV export of matrices and dot patterns
//! - PNG rendering with a viridis colour map and polar line plots
//!
//! ## Example
//!
//! ```rust,ignore
//! use tsimg_data::{read_table, render, OutputDirs};
//!
//! let table = read_table("data/DataAverage.csv")?;
//! let dirs = OutputDirs::create("./out")?;
//! for index in 0..table.n_series() {
//!     let series = table.series(index)?;
//!     // transform and export...
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod export;
mod io;
pub mod render;

pub use error::{DataError, Result};
pub use export::{matrix_to_csv, pattern_to_csv, write_text, OutputDirs, DATA_DIR, IMAGES_DIR};
pub use io::{read_csv, read_excel, read_npy, read_table, Table};
pub use render::{matrix_to_image, pattern_to_image, save_png, PolarStyle};
