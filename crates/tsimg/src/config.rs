//! Run configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tsimg_data::PolarStyle;
use tsimg_transforms::{MTFConfig, RecurrencePlotConfig, SDPConfig};

use crate::error::{BatchError, Result};

/// Which transform to run, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodConfig {
    /// Markov Transition Field.
    Mtf(MTFConfig),
    /// Recurrence Plot.
    Rp(RecurrencePlotConfig),
    /// Symmetrized Dot Pattern.
    Sdp(SDPConfig),
}

impl MethodConfig {
    /// Short method name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mtf(_) => "MTF",
            Self::Rp(_) => "RP",
            Self::Sdp(_) => "SDP",
        }
    }
}

/// Which artifacts to write and how to draw polar plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write `images/<index>.png`.
    pub write_images: bool,
    /// Write `data/<index>.csv`.
    pub write_data: bool,
    /// Canvas size in pixels for dot pattern plots.
    pub canvas_size: u32,
    /// Stroke width in pixels for dot pattern plots.
    pub line_width: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_images: true,
            write_data: true,
            canvas_size: 600,
            line_width: 3.0,
        }
    }
}

impl OutputConfig {
    /// Polar plot style derived from this configuration.
    pub fn polar_style(&self) -> PolarStyle {
        PolarStyle {
            canvas_size: self.canvas_size,
            line_width: self.line_width,
            ..Default::default()
        }
    }
}

/// Everything needed for one run over one input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Input table (`.csv`, `.xlsx`, `.xls` or `.npy`).
    pub input: PathBuf,
    /// Root folder receiving `images/` and `data/`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Transform and its parameters.
    pub method: MethodConfig,
    /// Artifact options.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl RunConfig {
    /// Create a config with default output options.
    pub fn new(input: impl Into<PathBuf>, method: MethodConfig) -> Self {
        Self {
            input: input.into(),
            output_dir: default_output_dir(),
            method,
            output: OutputConfig::default(),
        }
    }

    /// Set the output root.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set artifact options.
    #[must_use]
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Load a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BatchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsimg_transforms::{BinStrategy, RecurrenceThreshold, ResizeMode};

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{"input": "table.csv", "method": {"kind": "rp"}}"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.input, PathBuf::from("table.csv"));
        assert_eq!(config.output_dir, PathBuf::from("./data"));
        assert_eq!(config.method, MethodConfig::Rp(RecurrencePlotConfig::default()));
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_method_parameters_parse() {
        let json = r#"{
            "input": "table.npy",
            "output_dir": "out",
            "method": {"kind": "mtf", "image_size": 165, "n_bins": 8,
                       "strategy": "uniform", "resize": "segment"},
            "output": {"write_data": false}
        }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();

        let MethodConfig::Mtf(mtf) = &config.method else {
            panic!("expected MTF, got {:?}", config.method);
        };
        assert_eq!(mtf.image_size, Some(165));
        assert_eq!(mtf.n_bins, 8);
        assert_eq!(mtf.strategy, BinStrategy::Uniform);
        assert_eq!(mtf.resize, ResizeMode::Segment);
        assert!(!config.output.write_data);
        assert!(config.output.write_images);
    }

    #[test]
    fn test_round_trip_through_file() {
        let config = RunConfig::new(
            "series.csv",
            MethodConfig::Rp(RecurrencePlotConfig {
                dimension: 3,
                time_delay: 2,
                threshold: Some(RecurrenceThreshold::Distance { percentage: 20.0 }),
            }),
        )
        .with_output_dir("runs/rp");

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("run.json");
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(RunConfig::from_json_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_config_file() {
        let err = RunConfig::from_json_file("nope/run.json").unwrap_err();
        assert!(matches!(err, BatchError::ConfigRead { .. }));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(MethodConfig::Sdp(SDPConfig::default()).name(), "SDP");
        assert_eq!(MethodConfig::Mtf(MTFConfig::default()).name(), "MTF");
    }
}
