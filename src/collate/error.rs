//! Errors of collating length summaries.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reading HybPiper length summary files or writing the combined table.
#[derive(Error, Debug)]
pub enum CollateError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: expected at least 3 lines (loci, blank/ignored, sample), found {line_count}", path.display())]
    MalformedSummary { path: PathBuf, line_count: usize },

    #[error("{}: no sample identifier on line 3", path.display())]
    MissingSampleId { path: PathBuf },

    #[error("{}: {loci} loci in header but {values} length values", path.display())]
    LocusCountMismatch {
        path: PathBuf,
        loci: usize,
        values: usize,
    },

    #[error("no length summary files given")]
    NoSamples,
}

impl CollateError {
    /// Create an I/O error naming the file it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for collating.
pub type CollateResult<T> = Result<T, CollateError>;
