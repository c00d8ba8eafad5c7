//! # tsimg_core
//!
//! Core types and traits for tsimg time series imaging.
//!
//! This crate provides:
//! - [`Series`] for a validated univariate sequence
//! - [`Matrix`] alias for 2D transform outputs
//! - [`SeriesTransform`] trait implemented by every imaging transform
//! - Error types and common utilities
//!
//! ## Example
//!
//! ```rust,ignore
//! use tsimg_core::{Series, SeriesTransform};
//!
//! let series = Series::new(vec![1.0, 2.0, 3.0, 4.0, 5.0])?;
//! let (min, max) = series.range();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod series;
mod transform;

pub use error::{CoreError, Result};
pub use series::Series;
pub use transform::SeriesTransform;

/// Dense 2D output of a matrix-valued transform (rows x columns).
pub type Matrix = ndarray::Array2<f64>;
