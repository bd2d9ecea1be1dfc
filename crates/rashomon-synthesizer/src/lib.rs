//! # Rashomon Narrative Synthesizer
//!
//! Turns the units of one cluster into a natural-language narrative
//! description via a completion model.
//!
//! Synthesis never fails: transport and service errors become
//! human-readable placeholder descriptions, and a missing model
//! short-circuits to a fixed credentials placeholder without calling
//! out. One bad cluster never aborts a run.
//!
//! Two synthesis paths are supported:
//!
//! - **Unit path**: the cluster's raw unit texts are concatenated
//!   (bounded by a word ceiling) and summarized with a short, tightly
//!   capped completion.
//! - **Summary path**: each article is first distilled into a
//!   six-dimension structured summary; the cluster's summaries are then
//!   woven into a longer narrative.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod summary;
pub mod synthesizer;

mod prompt;

pub use config::SynthesizerConfig;
pub use summary::ArticleSummary;
pub use synthesizer::{is_placeholder, Synthesizer, CREDENTIALS_PLACEHOLDER};
