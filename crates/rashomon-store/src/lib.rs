//! # Rashomon Store
//!
//! File-backed persistence between pipeline stages.
//!
//! Everything is flat tabular CSV: the article corpus comes in from an
//! external collaborator, the narratives checkpoint decouples discovery
//! from scoring, and the agreement mapping goes out to downstream
//! consumers. A score cache amortizes repeat model calls across reruns.
//!
//! A missing corpus or checkpoint is the one fatal error in the
//! pipeline ([`StoreError::InputMissing`]); a missing cache file is
//! just an empty cache.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod corpus;
pub mod error;
pub mod mapping;
pub mod narratives;

pub use cache::ScoreCache;
pub use corpus::load_articles;
pub use error::StoreError;
pub use mapping::save_mapping;
pub use narratives::{load_narratives, save_narratives};

/// Default narratives checkpoint filename
pub const DEFAULT_NARRATIVES_FILE: &str = "narratives.csv";

/// Default agreement mapping filename
pub const DEFAULT_MAPPING_FILE: &str = "narrative_article_mapping.csv";

/// Default score cache filename
pub const DEFAULT_CACHE_FILE: &str = "score_cache.csv";
