//! Error types for pipeline orchestration

use rashomon_cluster::ClusterError;
use thiserror::Error;

/// Errors that can abort a pipeline stage
///
/// Degradations (failed embeddings, unparsable scores, missing
/// credentials) are not here: stages absorb those per call and report
/// them through metrics. A stage error means the run itself could not
/// produce a complete output set.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration rejected by validation
    #[error("configuration error: {0}")]
    Config(String),

    /// Cluster selection rejected its input vectors
    #[error("clustering error: {0}")]
    Cluster(#[from] ClusterError),

    /// A spawned stage task did not run to completion
    #[error("task error: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_error_converts() {
        let source = ClusterError::InvalidInput("mismatched dimensions".to_string());
        let error: PipelineError = source.into();
        assert!(matches!(error, PipelineError::Cluster(_)));
        assert!(error.to_string().contains("mismatched dimensions"));
    }

    #[test]
    fn test_config_error_message() {
        let error = PipelineError::Config("cluster.min_clusters must be greater than 0".into());
        assert!(error.to_string().starts_with("configuration error"));
    }
}
