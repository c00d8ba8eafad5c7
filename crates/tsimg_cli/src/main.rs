//! tsimg CLI: turn every column of a table into an image.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tsimg::data::{DATA_DIR, IMAGES_DIR};
use tsimg::{BatchReport, MethodConfig, OutputConfig, RunConfig};
use tsimg_transforms::{
    BinStrategy, MTFConfig, RecurrencePlotConfig, RecurrenceThreshold, ResizeMode, SDPConfig,
};

#[derive(Parser)]
#[command(name = "tsimg")]
#[command(author, version)]
#[command(about = "Convert time series into Markov Transition Fields, Recurrence Plots and Symmetrized Dot Patterns")]
#[command(long_about = "tsimg: time series imaging.

Every column of the input table (.csv or .xlsx/.xls with a header row, or a
2D .npy array) is one series. Results are written to
<OUTPUT>/images/<index>.png and <OUTPUT>/data/<index>.csv, where <index> is
the zero-based column index.

EXAMPLES:
  # Markov Transition Field, 165x165, 8 quantile bins
  tsimg mtf DataAverage.xlsx --image-size 165 --bins 8

  # Recurrence Plot with default embedding (dimension 7, delay 10)
  tsimg rp DataAverage.csv --output ./rp

  # Binary recurrence map keeping the closest 10% of pairs
  tsimg rp DataAverage.csv --dimension 3 --delay 2 --distance-pct 10

  # Symmetrized Dot Pattern
  tsimg sdp DataAverage.csv --xi 50 --lag 9

  # Run from a JSON config file
  tsimg run --config run.json")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Markov Transition Field
    Mtf {
        /// Input table (.csv, .xlsx, .xls or .npy)
        input: PathBuf,

        /// Output side length; omit to keep one pixel per sample
        #[arg(long, value_name = "SIZE")]
        image_size: Option<usize>,

        /// Number of quantization bins
        #[arg(long, default_value = "5", value_name = "N")]
        bins: usize,

        /// Bin placement
        #[arg(long, value_enum, default_value_t = Strategy::Quantile)]
        strategy: Strategy,

        /// Allow image sizes that do not divide the series length
        #[arg(long)]
        segment: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Recurrence Plot
    Rp {
        /// Input table (.csv, .xlsx, .xls or .npy)
        input: PathBuf,

        /// Embedding dimension
        #[arg(long, default_value = "7", value_name = "D")]
        dimension: usize,

        /// Time delay in samples
        #[arg(long, default_value = "10", value_name = "TAU")]
        delay: usize,

        /// Binarize with a fixed distance threshold
        #[arg(long, value_name = "EPS", conflicts_with_all = ["distance_pct", "point_pct"])]
        threshold: Option<f64>,

        /// Binarize at this percentage of the largest distance
        #[arg(long, value_name = "PCT", conflicts_with = "point_pct")]
        distance_pct: Option<f64>,

        /// Binarize per point, keeping this percentage of closest neighbours
        #[arg(long, value_name = "PCT")]
        point_pct: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Symmetrized Dot Pattern
    Sdp {
        /// Input table (.csv, .xlsx, .xls or .npy)
        input: PathBuf,

        /// Base angle of the first sector in degrees
        #[arg(long, default_value = "0", value_name = "DEG", allow_negative_numbers = true)]
        start_angle: f64,

        /// Angular gain in degrees
        #[arg(long, default_value = "50", value_name = "DEG", allow_negative_numbers = true)]
        xi: f64,

        /// Lag between radius and angle samples
        #[arg(long, default_value = "9", value_name = "L")]
        lag: usize,

        /// Canvas size in pixels
        #[arg(long, default_value = "600", value_name = "PX")]
        canvas: u32,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run from a JSON config file
    Run {
        /// Path to the config file
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output folder receiving images/ and data/
    #[arg(long, default_value = "./data", value_name = "DIR")]
    output: PathBuf,

    /// Skip writing PNG images
    #[arg(long)]
    no_images: bool,

    /// Skip writing CSV data files
    #[arg(long)]
    no_data: bool,
}

impl OutputArgs {
    fn apply(self, method: MethodConfig, input: PathBuf, canvas: Option<u32>) -> RunConfig {
        let mut output = OutputConfig {
            write_images: !self.no_images,
            write_data: !self.no_data,
            ..Default::default()
        };
        if let Some(canvas) = canvas {
            output.canvas_size = canvas;
        }
        RunConfig::new(input, method)
            .with_output_dir(self.output)
            .with_output(output)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Quantile,
    Uniform,
}

impl From<Strategy> for BinStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Quantile => BinStrategy::Quantile,
            Strategy::Uniform => BinStrategy::Uniform,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();

    let config = match cli.command {
        Commands::Mtf {
            input,
            image_size,
            bins,
            strategy,
            segment,
            output,
        } => {
            let method = MethodConfig::Mtf(MTFConfig {
                image_size,
                n_bins: bins,
                strategy: strategy.into(),
                resize: if segment {
                    ResizeMode::Segment
                } else {
                    ResizeMode::Strict
                },
            });
            output.apply(method, input, None)
        }
        Commands::Rp {
            input,
            dimension,
            delay,
            threshold,
            distance_pct,
            point_pct,
            output,
        } => {
            let threshold = match (threshold, distance_pct, point_pct) {
                (Some(epsilon), _, _) => Some(RecurrenceThreshold::Fixed { epsilon }),
                (_, Some(percentage), _) => Some(RecurrenceThreshold::Distance { percentage }),
                (_, _, Some(percentage)) => Some(RecurrenceThreshold::Point { percentage }),
                _ => None,
            };
            let method = MethodConfig::Rp(RecurrencePlotConfig {
                dimension,
                time_delay: delay,
                threshold,
            });
            output.apply(method, input, None)
        }
        Commands::Sdp {
            input,
            start_angle,
            xi,
            lag,
            canvas,
            output,
        } => {
            let method = MethodConfig::Sdp(SDPConfig {
                start_angle,
                xi,
                lag,
            });
            output.apply(method, input, Some(canvas))
        }
        Commands::Run { config } => RunConfig::from_json_file(&config)
            .with_context(|| format!("Failed to load config '{}'", config.display()))?,
    };

    handle_run(&config)
}

fn handle_run(config: &RunConfig) -> Result<()> {
    if !config.output.write_images && !config.output.write_data {
        bail!("Nothing to write: both images and data output are disabled");
    }

    println!("=== tsimg {} ===\n", config.method.name());
    println!("Input:  {}", config.input.display());
    if config.output.write_images {
        println!("Images: {}", config.output_dir.join(IMAGES_DIR).display());
    }
    if config.output.write_data {
        println!("Data:   {}", config.output_dir.join(DATA_DIR).display());
    }
    println!();

    let report = tsimg::execute(config)
        .with_context(|| format!("Failed to process '{}'", config.input.display()))?;

    print_report(&report);
    Ok(())
}

/// Print the run summary and every skipped series.
fn print_report(report: &BatchReport) {
    println!(
        "{}: {} of {} series processed",
        report.method,
        report.succeeded.len(),
        report.total()
    );

    if !report.is_complete() {
        println!("\nSkipped series:");
        for failure in &report.failed {
            println!("  [{}] {:<20} {}", failure.index, failure.name, failure.error);
        }
    }
}
