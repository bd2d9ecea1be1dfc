//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Checkpoint or corpus file error
    #[error("Storage error: {0}")]
    Store(#[from] rashomon_store::StoreError),

    /// Pipeline stage error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] rashomon_pipeline::PipelineError),

    /// Model client construction error
    #[error("Model error: {0}")]
    Model(#[from] rashomon_model::ModelError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
