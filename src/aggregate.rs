//! Grouping per-file samples into per-benchmark series.
//!
//! Files arrive in whatever order the filesystem hands them out. Points are
//! appended in that order and each series is sorted by input size once, in
//! [`SeriesAggregator::finish`]. Nothing downstream relies on discovery order.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::Error;
use crate::extract::{MetricSample, extract_metric};
use crate::parser::parse_file;
use crate::run_id::RunIdentifier;
use crate::value::MetricValue;

/// One point of a benchmark's line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Input size (x-axis).
    pub size: u64,
    /// Metric value (y-axis).
    pub value: f64,
}

/// Finalized per-benchmark series, keyed by benchmark name.
///
/// Benchmarks iterate in name order; points within a benchmark are sorted by
/// ascending size. Equal sizes are all kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BenchmarkSeries {
    series: BTreeMap<String, Vec<SeriesPoint>>,
}

impl BenchmarkSeries {
    /// Points for `benchmark`, if any were collected.
    #[must_use]
    pub fn get(&self, benchmark: &str) -> Option<&[SeriesPoint]> {
        self.series.get(benchmark).map(Vec::as_slice)
    }

    /// Iterates over `(benchmark, points)` in benchmark name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SeriesPoint])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of benchmarks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no benchmark has any point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of points across all benchmarks.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Pretty JSON rendering, `{"<benchmark>": [{"size": .., "value": ..}, ..]}`.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be represented in JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Accumulates samples for a fixed metric and region.
pub struct SeriesAggregator<'a, I: RunIdentifier + ?Sized> {
    metric: &'a str,
    region_index: usize,
    identifier: &'a I,
    series: BTreeMap<String, Vec<SeriesPoint>>,
}

impl<'a, I: RunIdentifier + ?Sized> SeriesAggregator<'a, I> {
    /// Creates an empty aggregator reading `metric` from region `region_index`.
    pub fn new(metric: &'a str, region_index: usize, identifier: &'a I) -> Self {
        Self {
            metric,
            region_index,
            identifier,
            series: BTreeMap::new(),
        }
    }

    /// Parses one log file and turns it into a sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn sample(&self, path: &Path) -> Result<MetricSample, Error> {
        let regions = parse_file(path)?;
        let run = self.identifier.identify(path);
        let value = match extract_metric(&regions, self.region_index, self.metric) {
            Some(MetricValue::Number(v)) => *v,
            Some(MetricValue::Text(raw)) => {
                warn!(
                    path = %path.display(),
                    metric = self.metric,
                    raw = raw.as_str(),
                    "metric is not numeric, plotting 0"
                );
                0.0
            }
            None => {
                debug!(
                    path = %path.display(),
                    metric = self.metric,
                    region = self.region_index,
                    regions = regions.len(),
                    "metric absent, plotting 0"
                );
                0.0
            }
        };
        Ok(MetricSample {
            benchmark: run.benchmark,
            size: run.size,
            region_index: self.region_index,
            value,
        })
    }

    /// Appends a sample to its benchmark's series.
    pub fn push(&mut self, sample: MetricSample) {
        self.series
            .entry(sample.benchmark)
            .or_default()
            .push(SeriesPoint {
                size: sample.size,
                value: sample.value,
            });
    }

    /// Samples and appends one file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn add_file(&mut self, path: &Path) -> Result<(), Error> {
        let sample = self.sample(path)?;
        self.push(sample);
        Ok(())
    }

    /// Sorts every series by size and returns the result.
    #[must_use]
    pub fn finish(mut self) -> BenchmarkSeries {
        for points in self.series.values_mut() {
            points.sort_by_key(|p| p.size);
        }
        BenchmarkSeries {
            series: self.series,
        }
    }
}

/// Builds the finalized series for `metric` in region `region_index` from
/// every file in `paths`.
///
/// # Errors
///
/// Stops at the first file that cannot be read.
pub fn aggregate<P, I>(
    paths: &[P],
    metric: &str,
    region_index: usize,
    identifier: &I,
) -> Result<BenchmarkSeries, Error>
where
    P: AsRef<Path>,
    I: RunIdentifier + ?Sized,
{
    let mut aggregator = SeriesAggregator::new(metric, region_index, identifier);
    for path in paths {
        aggregator.add_file(path.as_ref())?;
    }
    Ok(aggregator.finish())
}
