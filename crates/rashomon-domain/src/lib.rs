//! Rashomon Domain Layer
//!
//! This crate contains the core data model for the narrative discovery
//! pipeline. It stays close to dependency-free and defines the fundamental
//! value objects and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Article**: one corpus row - title, body text, optional metadata
//! - **Unit**: the atomic clustering input - a segment of article text
//! - **Embedding**: a unit's vector, or an empty sentinel when the call failed
//! - **Cluster**: a group of units judged semantically similar
//! - **Narrative**: the synthesized description of one cluster's theme
//! - **AgreementScore**: a clamped [-1, 1] scalar per (narrative, article)
//!
//! ## Architecture
//!
//! - Pure data and invariants only, no I/O
//! - Trait definitions for the external model boundary
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod article;
pub mod cluster;
pub mod embedding;
pub mod narrative;
pub mod run;
pub mod score;
pub mod traits;
pub mod unit;

// Re-exports for convenience
pub use article::Article;
pub use cluster::{group_assignments, Cluster};
pub use embedding::Embedding;
pub use narrative::Narrative;
pub use run::RunId;
pub use score::AgreementScore;
pub use unit::Unit;
