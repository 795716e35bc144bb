//! End-to-end tests of discovery, parsing, aggregation and rendering over a
//! synthetic run tree.

use std::fs;
use std::path::Path;

use simstats_trend::{
    DirectoryConvention, Outcome, PlotConfig, Region, SeriesPoint, collect, run,
};
use tempfile::TempDir;

// =============================================================================
// Helper functions
// =============================================================================

const METRIC: &str = "system.cpu.commitStats0.numInsts";

/// Render a stats file with one region per entry of `values`; `None` leaves
/// the metric out of that region.
fn stats_file(values: &[Option<f64>]) -> String {
    let mut out = String::new();
    for value in values {
        out.push_str("\n---------- Begin Simulation Statistics ----------\n");
        out.push_str("simSeconds                 0.000100   # Number of seconds simulated (Second)\n");
        if let Some(v) = value {
            out.push_str(&format!("{METRIC}   {v}   # Number of instructions committed (Count)\n"));
        }
        out.push_str("\n---------- End Simulation Statistics   ----------\n");
    }
    out
}

fn write_run(root: &Path, benchmark: &str, size: u64, values: &[Option<f64>]) {
    let dir = root.join(benchmark).join(format!("m5out-{benchmark}-{size}"));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("stats.txt"), stats_file(values)).unwrap();
}

fn fixture() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let runs = tmp.path().join("runs");
    write_run(&runs, "BFS", 16, &[Some(160.0), Some(1600.0), Some(16000.0)]);
    write_run(&runs, "BFS", 1, &[Some(10.0), Some(100.0), Some(1000.0)]);
    write_run(&runs, "BFS", 4, &[Some(40.0), Some(400.0), Some(4000.0)]);
    write_run(&runs, "SORT", 8, &[Some(80.0), None, Some(800.0)]);
    write_run(&runs, "SORT", 2, &[Some(20.0), Some(200.0)]);
    tmp
}

fn config(tmp: &TempDir, region: Region) -> PlotConfig {
    PlotConfig {
        region,
        pattern: format!("{}/runs/*/m5out-*-[0-9]*/stats.txt", tmp.path().display()),
        output_dir: tmp.path().join("results"),
        ..PlotConfig::default()
    }
}

fn sizes_and_values(points: &[SeriesPoint]) -> Vec<(u64, f64)> {
    points.iter().map(|p| (p.size, p.value)).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn series_sorted_by_size_per_benchmark() {
    let tmp = fixture();
    let (files, series) = collect(&config(&tmp, Region::Before), &DirectoryConvention)
        .unwrap()
        .unwrap();
    assert_eq!(files, 5);
    assert_eq!(
        sizes_and_values(series.get("BFS").unwrap()),
        vec![(1, 10.0), (4, 40.0), (16, 160.0)]
    );
    assert_eq!(
        sizes_and_values(series.get("SORT").unwrap()),
        vec![(2, 20.0), (8, 80.0)]
    );
}

#[test]
fn missing_metric_and_region_plot_as_zero() {
    let tmp = fixture();
    let (_, series) = collect(&config(&tmp, Region::In), &DirectoryConvention)
        .unwrap()
        .unwrap();
    // size 8 lacks the metric in region 1.
    assert_eq!(
        sizes_and_values(series.get("SORT").unwrap()),
        vec![(2, 200.0), (8, 0.0)]
    );

    let (_, series) = collect(&config(&tmp, Region::After), &DirectoryConvention)
        .unwrap()
        .unwrap();
    // size 2 only dumped two regions.
    assert_eq!(
        sizes_and_values(series.get("SORT").unwrap()),
        vec![(2, 0.0), (8, 800.0)]
    );
}

#[test]
fn run_writes_chart_and_json() {
    let tmp = fixture();
    let json_path = tmp.path().join("out").join("series.json");
    let cfg = PlotConfig {
        series_json: Some(json_path.clone()),
        ..config(&tmp, Region::In)
    };

    let Outcome::Rendered { chart, files, series } = run(&cfg).unwrap() else {
        panic!("expected a rendered chart");
    };
    assert_eq!(files, 5);
    assert_eq!(series.len(), 2);
    assert_eq!(
        chart,
        tmp.path()
            .join("results")
            .join(format!("{METRIC}_in_multi_bench_plot.pdf"))
    );
    assert!(fs::read(&chart).unwrap().starts_with(b"%PDF"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["BFS"][2]["size"], 16);
    assert_eq!(json["BFS"][2]["value"], 1600.0);
}

#[test]
fn no_matching_files_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config(&tmp, Region::Before);
    let outcome = run(&cfg).unwrap();
    assert_eq!(
        outcome,
        Outcome::NoInputs {
            pattern: cfg.pattern.clone()
        }
    );
    assert!(!cfg.output_dir.exists());
}

#[test]
fn aggregation_is_idempotent() {
    let tmp = fixture();
    let cfg = config(&tmp, Region::In);
    let (_, first) = collect(&cfg, &DirectoryConvention).unwrap().unwrap();
    let (_, second) = collect(&cfg, &DirectoryConvention).unwrap().unwrap();
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn directories_are_not_stats_files() {
    let tmp = fixture();
    let dir = tmp.path().join("runs/KNN/m5out-KNN-1/stats.txt");
    fs::create_dir_all(&dir).unwrap();
    let (files, series) = collect(&config(&tmp, Region::Before), &DirectoryConvention)
        .unwrap()
        .unwrap();
    assert_eq!(files, 5);
    assert!(series.get("KNN").is_none());
}

#[test]
fn unreadable_stats_file_is_fatal() {
    let tmp = fixture();
    let dir = tmp.path().join("runs/KNN/m5out-KNN-1");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("stats.txt"), [0xff, 0xfe, 0x00, b'\n']).unwrap();

    let cfg = config(&tmp, Region::Before);
    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, simstats_trend::Error::Io { .. }));
    assert!(err.to_string().contains("m5out-KNN-1"));
    assert!(!cfg.chart_path().exists());
}

#[test]
fn unsupported_chart_extension_writes_nothing() {
    let tmp = fixture();
    let json_path = tmp.path().join("series.json");
    let cfg = PlotConfig {
        out_suffix: "trend.eps".to_string(),
        series_json: Some(json_path.clone()),
        ..config(&tmp, Region::Before)
    };
    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, simstats_trend::Error::Render { .. }));
    assert!(!json_path.exists());
    assert!(!cfg.output_dir.exists());
}
