//! Run configuration.

use core::fmt;
use std::path::PathBuf;

/// Default metric: committed instructions of the first CPU.
pub const DEFAULT_METRIC: &str = "system.cpu.commitStats0.numInsts";
/// Default discovery pattern, relative to the working directory.
pub const DEFAULT_PATTERN: &str = "*/m5out-*-[0-9]*/stats.txt";
/// Default chart file name suffix.
pub const DEFAULT_OUT_SUFFIX: &str = "multi_bench_plot.pdf";
/// Default directory receiving the chart.
pub const DEFAULT_OUTPUT_DIR: &str = "results";

/// Which statistics dump of a run to read.
///
/// Benchmarks dump statistics before, at the end of, and after their timed
/// section, producing three regions in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Region {
    /// Region 0, before the timed section.
    #[default]
    Before,
    /// Region 1, the timed section itself.
    In,
    /// Region 2, after the timed section.
    After,
}

impl Region {
    /// Position of this region in a parsed stats file.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Before => 0,
            Self::In => 1,
            Self::After => 2,
        }
    }

    /// Label used in titles and file names.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::In => "in",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a plotting run needs. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotConfig {
    /// Metric name looked up in each region.
    pub metric: String,
    /// Region to read the metric from.
    pub region: Region,
    /// Glob pattern selecting stats files.
    pub pattern: String,
    /// Suffix of the chart file name.
    pub out_suffix: String,
    /// Directory receiving the chart; created if missing.
    pub output_dir: PathBuf,
    /// Optional path for a JSON dump of the aggregated series.
    pub series_json: Option<PathBuf>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            metric: DEFAULT_METRIC.to_string(),
            region: Region::default(),
            pattern: DEFAULT_PATTERN.to_string(),
            out_suffix: DEFAULT_OUT_SUFFIX.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            series_json: None,
        }
    }
}

impl PlotConfig {
    /// Chart location: `<output_dir>/<metric>_<region>_<suffix>`.
    ///
    /// The suffix is used verbatim; its extension selects the chart format.
    #[must_use]
    pub fn chart_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}_{}", self.metric, self.region, self.out_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_indices() {
        assert_eq!(Region::Before.index(), 0);
        assert_eq!(Region::In.index(), 1);
        assert_eq!(Region::After.index(), 2);
    }

    #[test]
    fn test_defaults() {
        let cfg = PlotConfig::default();
        assert_eq!(cfg.metric, "system.cpu.commitStats0.numInsts");
        assert_eq!(cfg.region, Region::Before);
        assert_eq!(cfg.pattern, "*/m5out-*-[0-9]*/stats.txt");
        assert_eq!(cfg.out_suffix, "multi_bench_plot.pdf");
        assert_eq!(cfg.output_dir, PathBuf::from("results"));
        assert!(cfg.series_json.is_none());
    }

    #[test]
    fn test_chart_path_is_literal() {
        let cfg = PlotConfig::default();
        assert_eq!(
            cfg.chart_path(),
            PathBuf::from("results/system.cpu.commitStats0.numInsts_before_multi_bench_plot.pdf")
        );

        let cfg = PlotConfig {
            region: Region::In,
            out_suffix: "plot.png".to_string(),
            ..PlotConfig::default()
        };
        assert_eq!(
            cfg.chart_path(),
            PathBuf::from("results/system.cpu.commitStats0.numInsts_in_plot.png")
        );
    }

    #[test]
    fn test_chart_path_odd_suffixes() {
        for suffix in ["plot.é/", "plot.pdf/", "plot", ".pdf"] {
            let cfg = PlotConfig {
                out_suffix: suffix.to_string(),
                ..PlotConfig::default()
            };
            let path = cfg.chart_path();
            assert!(path.starts_with("results"));
        }
    }
}
