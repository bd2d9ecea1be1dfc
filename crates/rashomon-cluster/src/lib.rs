//! # Rashomon Cluster Selection
//!
//! Picks a cluster count for a set of unit embeddings by sweeping
//! candidate counts, fitting seeded k-means for each, and keeping the
//! partition with the best mean silhouette score.
//!
//! ## Selection Policy
//!
//! - Fewer vectors than `min_clusters` short-circuits to a single
//!   cluster. That outcome is explicit ([`Selection::Degenerate`]),
//!   not an error.
//! - Candidates range over `[min_clusters, min(max_clusters, N - 1)]`.
//!   A candidate whose smallest cluster has fewer than two members is
//!   skipped, because the silhouette score is undefined there.
//! - The highest-scoring candidate wins; on ties the first k scanned
//!   wins. If nothing is scoreable, the selector falls back to
//!   `min_clusters` and accepts that partition as-is.
//!
//! Cluster ids are stable only within one run. Re-running the sweep on
//! a different corpus can hand the same id to a different theme.
//!
//! ## Example
//!
//! ```
//! use rashomon_cluster::{ClusterSelector, Selection};
//!
//! let mut vectors = Vec::new();
//! for i in 0..6 {
//!     vectors.push(vec![i as f64 * 0.01, 0.0]);
//!     vectors.push(vec![10.0 + i as f64 * 0.01, 0.0]);
//! }
//!
//! let selector = ClusterSelector::new(2, 5, 42);
//! let selection = selector.select(&vectors).unwrap();
//! assert_eq!(selection.k(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod selection;
pub mod selector;

mod silhouette;

pub use error::ClusterError;
pub use selection::Selection;
pub use selector::ClusterSelector;
