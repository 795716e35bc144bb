//! Deriving the benchmark name and input size from a log file's location.
//!
//! The simulator harness writes each run to
//! `<benchmark>/<prefix>-<benchmark>-<size>/stats.txt`, e.g.
//! `BFS/m5out-BFS-1/stats.txt`. Nothing inside the log records which
//! benchmark or input size produced it, so the directory names are the only
//! source of that information.

use std::path::Path;

/// Benchmark name and input size of one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunPathInfo {
    /// Benchmark name, e.g. `"BFS"`.
    pub benchmark: String,
    /// Input size; `0` when the path carries none.
    pub size: u64,
}

/// Maps a log file path to the run it belongs to.
///
/// Implement this to support a different output layout without touching
/// parsing or aggregation.
pub trait RunIdentifier {
    /// Identify the run that produced the log at `path`.
    fn identify(&self, path: &Path) -> RunPathInfo;
}

/// The `<benchmark>/<prefix>-<benchmark>-<size>/<logfile>` layout.
///
/// The grandparent directory name is authoritative for the benchmark; the
/// benchmark token embedded in the parent directory is not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryConvention;

/// Minimum number of `-` separated tokens for the size to be read.
const MIN_TOKENS: usize = 3;

impl RunIdentifier for DirectoryConvention {
    fn identify(&self, path: &Path) -> RunPathInfo {
        let parent = path.parent();
        let benchmark = parent
            .and_then(Path::parent)
            .map(base_name)
            .unwrap_or_default();
        let size = parent.map(base_name).map_or(0, |name| size_token(&name));
        RunPathInfo { benchmark, size }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `"m5out-BFS-16"` -> 16; anything unparsable -> 0.
fn size_token(dir_name: &str) -> u64 {
    let parts: Vec<&str> = dir_name.split('-').collect();
    if parts.len() < MIN_TOKENS {
        return 0;
    }
    parts
        .last()
        .and_then(|last| last.parse().ok())
        .unwrap_or(0)
}
