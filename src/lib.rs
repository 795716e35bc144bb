#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod aggregate;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod extract;
pub mod parser;
pub mod render;
pub mod run_id;
pub mod value;

use std::path::PathBuf;

use tracing::info;

// Re-export main types
pub use aggregate::{BenchmarkSeries, SeriesAggregator, SeriesPoint, aggregate};
pub use config::{PlotConfig, Region};
pub use discovery::discover;
pub use errors::Error;
pub use extract::{MetricSample, extract_metric};
pub use parser::{StatsRegion, parse_file, parse_reader, parse_str};
pub use render::{ChartFormat, render};
pub use run_id::{DirectoryConvention, RunIdentifier, RunPathInfo};
pub use value::MetricValue;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The discovery pattern matched no file; nothing was written.
    NoInputs {
        /// The pattern that matched nothing.
        pattern: String,
    },
    /// The chart was written.
    Rendered {
        /// Location of the chart.
        chart: PathBuf,
        /// Number of stats files processed.
        files: usize,
        /// The series that were plotted.
        series: BenchmarkSeries,
    },
}

/// Collects the series described by `config` from the files matching its
/// pattern, using `identifier` to name each run.
///
/// Returns `None` when the pattern matches nothing.
///
/// # Errors
///
/// Fails on a malformed pattern or an unreadable stats file.
pub fn collect<I: RunIdentifier + ?Sized>(
    config: &PlotConfig,
    identifier: &I,
) -> Result<Option<(usize, BenchmarkSeries)>, Error> {
    let paths = discover(&config.pattern)?;
    if paths.is_empty() {
        return Ok(None);
    }
    let series = aggregate(&paths, &config.metric, config.region.index(), identifier)?;
    info!(
        files = paths.len(),
        benchmarks = series.len(),
        points = series.point_count(),
        "aggregated series"
    );
    Ok(Some((paths.len(), series)))
}

/// Runs the whole pipeline: discovery, parsing, aggregation, optional JSON
/// export and rendering.
///
/// # Errors
///
/// Fails on a malformed pattern, an unreadable stats file, an unsupported
/// chart extension, or when the chart or JSON export cannot be written.
pub fn run(config: &PlotConfig) -> Result<Outcome, Error> {
    let Some((files, series)) = collect(config, &DirectoryConvention)? else {
        return Ok(Outcome::NoInputs {
            pattern: config.pattern.clone(),
        });
    };
    // Reject an unwritable chart name before producing any output.
    ChartFormat::from_path(&config.chart_path())?;

    if let Some(json_path) = &config.series_json {
        if let Some(parent) = json_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(json_path, series.to_json()?).map_err(|e| Error::io(json_path, e))?;
        info!(path = %json_path.display(), "series written");
    }

    match render(&series, config)? {
        Some(chart) => Ok(Outcome::Rendered {
            chart,
            files,
            series,
        }),
        None => Ok(Outcome::NoInputs {
            pattern: config.pattern.clone(),
        }),
    }
}
