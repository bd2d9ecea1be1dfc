//! Error types for checkpoint and corpus I/O

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the pipeline's tabular files
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required corpus or checkpoint file is absent
    ///
    /// The one fatal error in the pipeline: the stage that needed the
    /// file halts and reports which path it expected.
    #[error("required input file not found: {path}")]
    InputMissing {
        /// The path that was expected to exist
        path: PathBuf,
    },

    /// Filesystem failure while reading or writing
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed header or row in a tabular file
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    /// Shorthand for the fatal missing-file case
    pub fn input_missing(path: impl Into<PathBuf>) -> Self {
        StoreError::InputMissing { path: path.into() }
    }
}
