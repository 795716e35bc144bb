//! Locating stats files with a glob pattern.

use std::path::PathBuf;

use glob::MatchOptions;
use tracing::{debug, warn};

use crate::errors::Error;

/// Shell-style matching: `*` and `?` do not match a leading `.`, so hidden
/// directories are only searched when the pattern names them.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expands `pattern` into the matching file paths.
///
/// Directories that cannot be listed are skipped with a warning; only the
/// files actually matched are later read. Callers must treat the result as an
/// unordered set.
///
/// # Errors
///
/// Returns [`Error::Pattern`] for a malformed pattern.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let entries = glob::glob_with(pattern, MATCH_OPTIONS).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => warn!(
                path = %e.path().display(),
                error = %e.error(),
                "cannot list directory, skipping"
            ),
        }
    }
    debug!(pattern, matched = paths.len(), "discovered stats files");
    Ok(paths)
}
