//! # Rashomon Agreement Scorer
//!
//! Scores every (narrative, article) pair in [-1, 1]: above zero means
//! the article agrees with the narrative, below zero means it pushes
//! back, zero means neutrality or no relation.
//!
//! The completion model is told to answer with a bare number, but the
//! parser assumes it will not always comply: the first numeric token
//! found anywhere in the response is used, and anything unparseable
//! degrades to a neutral 0.0 with a warning. Scoring never aborts a
//! run.
//!
//! Because the scorer makes |narratives| x |articles| model calls, each
//! pair's score can be memoized under a content hash ([`pair_key`]) and
//! reused across reruns.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod parse;
pub mod scorer;

pub use config::ScorerConfig;
pub use parse::parse_first_number;
pub use scorer::{pair_key, ScoreOutcome, Scorer};
