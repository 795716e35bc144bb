//! Metric lookup within parsed regions.

use crate::parser::StatsRegion;
use crate::value::MetricValue;

/// Returns `metric` from the region at `region_index`.
///
/// `None` is the expected result when the benchmark dumped fewer regions than
/// requested or never reports that metric; it is not an error.
#[must_use]
pub fn extract_metric<'a>(
    regions: &'a [StatsRegion],
    region_index: usize,
    metric: &str,
) -> Option<&'a MetricValue> {
    regions.get(region_index)?.get(metric)
}

/// One observation taken from one log file.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    /// Benchmark that produced the log.
    pub benchmark: String,
    /// Input size of the run.
    pub size: u64,
    /// Region the value was read from.
    pub region_index: usize,
    /// Plotted value, with absent or textual metrics already mapped to `0.0`.
    pub value: f64,
}
