//! Parser splitting a simulator `stats.txt` dump into statistics regions.
//!
//! Every `m5_dumpstats` call produces one region:
//!
//! ```text
//! ---------- Begin Simulation Statistics ----------
//! simSeconds                      0.000123    # Number of seconds simulated (Second)
//! system.cpu.commitStats0.numInsts  12345     # Number of instructions committed
//!
//! ---------- End Simulation Statistics   ----------
//! ```
//!
//! A region becomes visible only once its closing marker is seen. A region
//! still open at end of input is dropped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::Error;
use crate::value::MetricValue;

/// Substring marking the start of a region.
pub const BEGIN_MARKER: &str = "Begin Simulation Statistics";
/// Substring marking the end of a region.
pub const END_MARKER: &str = "End Simulation Statistics";
/// Prefix of comment lines inside a region.
const COMMENT_PREFIX: char = '#';

/// One delimited statistics region: metric name to value, in order of
/// appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRegion {
    metrics: IndexMap<String, MetricValue>,
}

impl StatsRegion {
    /// Creates an empty region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a metric. A repeated name keeps its original position and
    /// takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: MetricValue) {
        self.metrics.insert(name.into(), value);
    }

    /// Looks up a metric by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }

    /// Number of metrics in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether the region holds no metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Iterates over `(name, value)` pairs in order of appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn clear(&mut self) {
        self.metrics.clear();
    }
}

/// Parses a stats file from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read. Malformed
/// lines never cause an error.
pub fn parse_file(path: &Path) -> Result<Vec<StatsRegion>, Error> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let regions = parse_reader(BufReader::new(file)).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), regions = regions.len(), "parsed stats file");
    Ok(regions)
}

/// Parses regions from any buffered reader.
///
/// # Errors
///
/// Propagates read errors from `reader`.
pub fn parse_reader<R: BufRead>(reader: R) -> std::io::Result<Vec<StatsRegion>> {
    let mut regions = Vec::new();
    let mut pending = StatsRegion::new();
    let mut inside = false;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.contains(BEGIN_MARKER) {
            inside = true;
            pending.clear();
        } else if line.contains(END_MARKER) {
            inside = false;
            if !pending.is_empty() {
                regions.push(core::mem::take(&mut pending));
            }
        } else if inside {
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let (Some(name), Some(raw)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            pending.insert(name, MetricValue::parse(raw));
        }
    }

    Ok(regions)
}

/// Parses regions from an in-memory string.
#[must_use]
pub fn parse_str(input: &str) -> Vec<StatsRegion> {
    // Reading from a byte slice cannot fail.
    parse_reader(input.as_bytes()).unwrap_or_default()
}
