//! # tsimg
//!
//! Turn time series into images for visual and image-based analysis.
//!
//! tsimg provides three independent transforms and the plumbing to run them
//! over every column of a table:
//!
//! - **Markov Transition Field**: bin-to-bin transition probabilities laid out
//!   over pairs of time positions
//! - **Recurrence Plot**: pairwise distances between delay-embedded states
//! - **Symmetrized Dot Pattern**: six mirrored polar traces
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tsimg::prelude::*;
//!
//! let config = RunConfig::new(
//!     "DataAverage.csv",
//!     MethodConfig::Rp(RecurrencePlotConfig::default()),
//! )
//! .with_output_dir("./data");
//!
//! let report = tsimg::execute(&config)?;
//! for failure in &report.failed {
//!     eprintln!("series {} skipped: {}", failure.index, failure.error);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod artifact;
mod batch;
mod config;
mod error;

// Re-export all crates
pub use tsimg_core as core;
pub use tsimg_data as data;
pub use tsimg_transforms as transforms;

pub use artifact::Artifact;
pub use batch::{execute, run_batch, BatchReport, SeriesFailure, SeriesOutcome};
pub use config::{MethodConfig, OutputConfig, RunConfig};
pub use error::{BatchError, Result, SeriesError};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use tsimg::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tsimg_core::{CoreError, Matrix, Series, SeriesTransform};

    // Data
    pub use tsimg_data::{read_table, OutputDirs, Table};

    // Transforms
    pub use tsimg_transforms::{
        BinStrategy, MTFConfig, RecurrencePlotConfig, RecurrenceThreshold, ResizeMode, SDPConfig,
        SdpPattern, TSToMTF, TSToRP, TSToSDP,
    };

    // Runs
    pub use crate::{execute, BatchReport, MethodConfig, OutputConfig, RunConfig};
}
