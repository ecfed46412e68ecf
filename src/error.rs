//! Top-level error of the command line tools.

use crate::collate::CollateError;
use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a run of one of the command line tools.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Parsing(#[from] ParsingError),

    #[error("{0}")]
    Collate(#[from] CollateError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a write error naming the output file.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
