//! Simulator stats trend plotter.
//!
//! Reads every `stats.txt` matching `--pattern`, takes `--metric` from the
//! chosen `--region` of each, and plots one line per benchmark against input
//! size.
//!
//! Run: `simstats-trend [--metric <name>] [--region before|in|after] [--pattern <glob>]
//! [--out_pdf <suffix>] [--output-dir <dir>] [--series-json <path>] [-v...]`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use simstats_trend::config::{
    DEFAULT_METRIC, DEFAULT_OUT_SUFFIX, DEFAULT_OUTPUT_DIR, DEFAULT_PATTERN,
};
use simstats_trend::{Outcome, PlotConfig, Region};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "simstats-trend",
    version,
    about = "Plot a simulator metric across benchmarks and input sizes"
)]
struct Cli {
    /// Metric name looked up in each region
    #[arg(long, default_value = DEFAULT_METRIC)]
    metric: String,
    /// Statistics region to read
    #[arg(long, value_enum, default_value_t = Region::Before)]
    region: Region,
    /// Glob pattern selecting stats files, relative to the working directory
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,
    /// Suffix of the chart file name
    #[arg(long = "out_pdf", default_value = DEFAULT_OUT_SUFFIX)]
    out_pdf: String,
    /// Directory receiving the chart
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Also write the aggregated series as JSON to this path
    #[arg(long)]
    series_json: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> PlotConfig {
        PlotConfig {
            metric: self.metric,
            region: self.region,
            pattern: self.pattern,
            out_suffix: self.out_pdf,
            output_dir: self.output_dir,
            series_json: self.series_json,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(config: &PlotConfig) -> anyhow::Result<()> {
    let outcome = simstats_trend::run(config)
        .with_context(|| format!("plotting {} from {}", config.metric, config.pattern))?;
    match outcome {
        Outcome::NoInputs { pattern } => {
            println!("No files found with pattern: {pattern}");
        }
        Outcome::Rendered { chart, .. } => {
            println!("Plot saved to {} (no GUI displayed).", chart.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.into_config();

    if let Err(e) = run(&config) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
