//! Error types for the cluster selection sweep

use thiserror::Error;

/// Errors produced while selecting a cluster count
///
/// Too few vectors is not an error; that case is reported as
/// [`crate::Selection::Degenerate`].
#[derive(Error, Debug)]
pub enum ClusterError {
    /// The input vectors were malformed (zero-length or mismatched dimensions)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The k-means fit failed for the fallback cluster count
    #[error("clustering failed: {0}")]
    Fit(String),
}
