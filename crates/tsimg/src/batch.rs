//! Parallel batch runner over the series of one table.
//!
//! Every series is transformed and exported independently on the rayon pool.
//! Per-series problems are collected into the [`BatchReport`]; only failing
//! to read the table or create the output folders aborts the run.

use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use tsimg_core::SeriesTransform;
use tsimg_data::{read_table, save_png, write_text, OutputDirs, Table};
use tsimg_transforms::{TSToMTF, TSToRP, TSToSDP};

use crate::artifact::Artifact;
use crate::config::{MethodConfig, OutputConfig, RunConfig};
use crate::error::{Result, SeriesError};

/// A series that was transformed and written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesOutcome {
    /// Column index in the input table.
    pub index: usize,
    /// Column name.
    pub name: String,
    /// Output dimensions, see [`Artifact::dims`].
    pub dims: (usize, usize),
    /// Image written, if any.
    pub image: Option<PathBuf>,
    /// Data file written, if any.
    pub data: Option<PathBuf>,
}

/// A series that was skipped.
#[derive(Debug)]
pub struct SeriesFailure {
    /// Column index in the input table.
    pub index: usize,
    /// Column name.
    pub name: String,
    /// What went wrong.
    pub error: SeriesError,
}

/// Summary of one run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Transform name.
    pub method: String,
    /// Successfully processed series, ordered by index.
    pub succeeded: Vec<SeriesOutcome>,
    /// Skipped series, ordered by index.
    pub failed: Vec<SeriesFailure>,
}

impl BatchReport {
    /// Number of series attempted.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when every series succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Execute a full run: read the table, create output folders, transform every
/// series in parallel and write its artifacts.
///
/// # Errors
///
/// Returns an error only for problems that affect the whole run: a missing or
/// unreadable input table, or output folders that cannot be created.
pub fn execute(config: &RunConfig) -> Result<BatchReport> {
    let table = read_table(&config.input)?;
    let dirs = OutputDirs::create(&config.output_dir)?;

    tracing::info!(
        "Running {} on {} series of {} samples from {}",
        config.method.name(),
        table.n_series(),
        table.n_samples(),
        config.input.display()
    );

    let output = &config.output;
    let report = match &config.method {
        MethodConfig::Mtf(c) => run_batch(&table, &TSToMTF::from_config(c.clone()), &dirs, output),
        MethodConfig::Rp(c) => run_batch(&table, &TSToRP::from_config(c.clone()), &dirs, output),
        MethodConfig::Sdp(c) => run_batch(&table, &TSToSDP::from_config(c.clone()), &dirs, output),
    };

    tracing::info!(
        "{} complete: {} of {} series processed",
        report.method,
        report.succeeded.len(),
        report.total()
    );
    Ok(report)
}

/// Transform every series of `table` and write its artifacts into `dirs`.
///
/// Series are processed in parallel; each writes only its own
/// `<index>.png` / `<index>.csv`, so no coordination is needed.
pub fn run_batch<T>(
    table: &Table,
    transform: &T,
    dirs: &OutputDirs,
    output: &OutputConfig,
) -> BatchReport
where
    T: SeriesTransform,
    T::Output: Artifact,
{
    let results: Vec<std::result::Result<SeriesOutcome, SeriesFailure>> = (0..table.n_series())
        .into_par_iter()
        .map(|index| {
            let name = table.names()[index].clone();
            process_series(table, index, transform, dirs, output).map_err(|error| {
                tracing::warn!("Skipping series {} ({}): {}", index, name, error);
                SeriesFailure { index, name, error }
            })
        })
        .collect();

    let mut report = BatchReport {
        method: transform.name().to_string(),
        ..Default::default()
    };
    // collect() on an indexed parallel iterator keeps index order
    for result in results {
        match result {
            Ok(outcome) => report.succeeded.push(outcome),
            Err(failure) => report.failed.push(failure),
        }
    }
    report
}

fn process_series<T>(
    table: &Table,
    index: usize,
    transform: &T,
    dirs: &OutputDirs,
    output: &OutputConfig,
) -> std::result::Result<SeriesOutcome, SeriesError>
where
    T: SeriesTransform,
    T::Output: Artifact,
{
    let series = table.series(index)?;
    let artifact = transform.transform(&series)?;
    let dims = artifact.dims();
    tracing::debug!("Series {}: {} -> {}x{}", index, transform.name(), dims.0, dims.1);

    let image = if output.write_images {
        let path = dirs.image_path(index);
        save_png(&artifact.render(output), &path)?;
        Some(path)
    } else {
        None
    };

    let data = if output.write_data {
        let path = dirs.data_path(index);
        write_text(&path, &artifact.to_csv())?;
        Some(path)
    } else {
        None
    };

    Ok(SeriesOutcome {
        index,
        name: series.name().unwrap_or_default().to_string(),
        dims,
        image,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use tsimg_core::CoreError;

    fn ramp_table(n_samples: usize, n_series: usize) -> Table {
        Table::from_array(Array2::from_shape_fn((n_samples, n_series), |(t, s)| {
            ((t * (s + 1)) as f64 * 0.1).sin()
        }))
        .unwrap()
    }

    #[test]
    fn test_all_series_written() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::create(tmp.path()).unwrap();
        let table = ramp_table(16, 3);

        let report = run_batch(&table, &TSToMTF::new(8, 4), &dirs, &OutputConfig::default());

        assert!(report.is_complete());
        assert_eq!(report.method, "MTF");
        assert_eq!(report.succeeded.len(), 3);
        for (i, outcome) in report.succeeded.iter().enumerate() {
            assert_eq!(outcome.index, i);
            assert_eq!(outcome.dims, (8, 8));
            assert!(dirs.image_path(i).is_file());
            assert!(dirs.data_path(i).is_file());
        }
    }

    #[test]
    fn test_failures_are_isolated() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::create(tmp.path()).unwrap();
        let mut values = Array2::from_shape_fn((12, 3), |(t, _)| t as f64);
        values[[4, 1]] = f64::NAN;
        let table = Table::from_array(values).unwrap();

        let report = run_batch(&table, &TSToRP::new(2, 1), &dirs, &OutputConfig::default());

        assert_eq!(report.total(), 3);
        let indices: Vec<usize> = report.succeeded.iter().map(|o| o.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].index, 1);
        assert!(matches!(
            report.failed[0].error,
            SeriesError::Transform(CoreError::NonFiniteValue { position: 4 })
        ));
        assert!(!dirs.image_path(1).exists());
    }

    #[test]
    fn test_artifact_toggles() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::create(tmp.path()).unwrap();
        let output = OutputConfig {
            write_images: false,
            ..Default::default()
        };

        let sdp = TSToSDP::new(0.0, 50.0, 3);
        let report = run_batch(&ramp_table(30, 1), &sdp, &dirs, &output);

        let outcome = &report.succeeded[0];
        assert_eq!(outcome.dims, (6, 27));
        assert!(outcome.image.is_none());
        assert_eq!(outcome.data.as_deref(), Some(dirs.data_path(0).as_path()));
        assert!(!dirs.image_path(0).exists());
    }

    #[test]
    fn test_oversized_parameters_fail_per_series() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::create(tmp.path()).unwrap();
        let table = ramp_table(10, 2);

        let sdp = TSToSDP::new(0.0, 50.0, usize::MAX);
        let rp = TSToRP::new(3, usize::MAX / 2 + 1);
        for report in [
            run_batch(&table, &sdp, &dirs, &OutputConfig::default()),
            run_batch(&table, &rp, &dirs, &OutputConfig::default()),
        ] {
            assert_eq!(report.failed.len(), 2);
            assert!(report.failed.iter().all(|f| matches!(
                f.error,
                SeriesError::Transform(CoreError::InsufficientLength { actual: 10, .. })
            )));
        }
    }

    #[test]
    fn test_write_failure_skips_series() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = OutputDirs {
            images: tmp.path().join("missing-images"),
            data: tmp.path().join("missing-data"),
        };

        let rp = TSToRP::new(2, 2);
        let report = run_batch(&ramp_table(10, 2), &rp, &dirs, &OutputConfig::default());

        assert_eq!(report.failed.len(), 2);
        assert!(report
            .failed
            .iter()
            .all(|f| matches!(f.error, SeriesError::Output(_))));
    }
}
