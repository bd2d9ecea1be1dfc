//! Rashomon Pipeline Orchestration
//!
//! Wires the leaf crates into the two batch stages:
//!
//! - **Discovery**: articles -> units or summaries -> embeddings ->
//!   cluster selection -> narrative synthesis
//! - **Scoring**: narratives x articles -> agreement scores, with
//!   content-hash memoization
//!
//! The stages are decoupled by the persisted narratives checkpoint, so
//! scoring can run against narratives produced by an earlier process.
//! Stages degrade per call rather than failing the run: missing or
//! rejected credentials, transport faults, and unparsable responses all
//! become documented sentinels, counted in the stage metrics.
//!
//! # Examples
//!
//! ```
//! use rashomon_domain::Article;
//! use rashomon_model::{MockCompletionModel, MockEmbeddingModel};
//! use rashomon_pipeline::{DiscoveryMode, DiscoveryStage, PipelineConfig};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let articles = vec![Article::new(0, "Cable cut", "A subsea cable was severed overnight.")];
//! let stage = DiscoveryStage::new(
//!     Some(Arc::new(MockCompletionModel::new("A narrative."))),
//!     Some(Arc::new(MockEmbeddingModel::new(8))),
//!     PipelineConfig::default(),
//! );
//! let outcome = stage.run(&articles, DiscoveryMode::Units).await.unwrap();
//! assert_eq!(outcome.narratives.len(), 1);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod gate;
pub mod metrics;
pub mod scoring;

pub use config::{
    ClusterConfig, LimitsConfig, ModelSettings, PipelineConfig, SegmenterConfig,
};
pub use discovery::{DiscoveryMode, DiscoveryOutcome, DiscoveryStage};
pub use error::PipelineError;
pub use gate::CredentialGate;
pub use metrics::{DiscoveryMetrics, ScoringMetrics};
pub use scoring::{ScoringOutcome, ScoringStage};
