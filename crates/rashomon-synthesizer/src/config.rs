//! Configuration for narrative synthesis

use serde::{Deserialize, Serialize};

/// Configuration for the Synthesizer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Word ceiling for the concatenated cluster text
    pub max_corpus_words: usize,

    /// Output-token ceiling for a unit-path narrative
    pub narrative_max_tokens: u32,

    /// Sampling temperature for narrative completions
    pub narrative_temperature: f32,

    /// Output-token ceiling for a structured article summary
    pub summary_max_tokens: u32,

    /// Sampling temperature for structured summaries
    pub summary_temperature: f32,

    /// Output-token ceiling for a summary-path narrative
    pub summary_narrative_max_tokens: u32,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            max_corpus_words: 50_000,
            narrative_max_tokens: 150,
            narrative_temperature: 0.5,
            summary_max_tokens: 800,
            summary_temperature: 0.3,
            summary_narrative_max_tokens: 1000,
        }
    }
}

impl SynthesizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_corpus_words == 0 {
            return Err("max_corpus_words must be greater than 0".to_string());
        }
        if self.narrative_max_tokens == 0 {
            return Err("narrative_max_tokens must be greater than 0".to_string());
        }
        if self.summary_narrative_max_tokens == 0 {
            return Err("summary_narrative_max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.narrative_temperature) {
            return Err("narrative_temperature must be in [0, 2]".to_string());
        }
        if !(0.0..=2.0).contains(&self.summary_temperature) {
            return Err("summary_temperature must be in [0, 2]".to_string());
        }
        Ok(())
    }
}
