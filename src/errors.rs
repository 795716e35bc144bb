//! Submodule defining the errors used across the crate.

use std::path::PathBuf;

/// Errors that abort a plotting run.
///
/// Per-line parse anomalies and missing metrics are not errors: they are
/// recovered where they occur and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file or directory could not be opened, read, created or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The discovery pattern is not a valid glob.
    #[error("Invalid discovery pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// The underlying glob error.
        #[source]
        source: glob::PatternError,
    },
    /// The chart backend failed to draw or persist the figure.
    #[error("Failed to render chart {}: {message}", path.display())]
    Render {
        /// Destination of the chart.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },
    /// The aggregated series could not be serialized.
    #[error("Failed to serialize series: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wraps an I/O error together with the path that caused it.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
