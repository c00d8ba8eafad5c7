//! # tsimg_transforms
//!
//! Imaging transforms that turn a univariate time series into a 2D structure.
//!
//! This crate provides:
//! - Markov Transition Fields ([`TSToMTF`]) over equal-width or quantile bins
//! - Recurrence Plots ([`TSToRP`]) from a delay embedding
//! - Symmetrized Dot Patterns ([`TSToSDP`]) as six polar point clouds
//!
//! ## Example
//!
//! ```rust,ignore
//! use tsimg_core::{Series, SeriesTransform};
//! use tsimg_transforms::{TSToMTF, TSToRP};
//!
//! let series = Series::new(values)?;
//!
//! let field = TSToMTF::new(64, 8).transform(&series)?;
//! let plot = TSToRP::new(3, 2).transform(&series)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod mtf;
pub mod quantize;
pub mod recurrence;
pub mod sdp;

pub use aggregate::{aggregate, segment_bounds, ResizeMode};
pub use mtf::{markov_field, transition_matrix, MTFConfig, TSToMTF};
pub use quantize::{BinStrategy, QuantizationScheme};
pub use recurrence::{
    delay_embedding, pairwise_distances, RecurrencePlotConfig, RecurrenceThreshold, TSToRP,
};
pub use sdp::{SDPConfig, SdpPattern, SdpSector, TSToSDP, SDP_SECTORS};
