//! Core Synthesizer implementation

use crate::config::SynthesizerConfig;
use crate::prompt;
use crate::summary::ArticleSummary;
use rashomon_domain::traits::{CompletionModel, CompletionRequest};
use std::sync::Arc;
use tracing::{info, warn};

/// Returned for every cluster when no completion model is configured
pub const CREDENTIALS_PLACEHOLDER: &str =
    "API credentials not provided. Cannot generate narrative.";

const ERROR_PREFIX: &str = "Error generating narrative:";

/// Whether a narrative description is a degradation placeholder rather
/// than model output
pub fn is_placeholder(description: &str) -> bool {
    description == CREDENTIALS_PLACEHOLDER || description.starts_with(ERROR_PREFIX)
}

/// Produces narrative descriptions for clusters of units
///
/// Synthesis is infallible by policy: per-cluster failures degrade to
/// placeholder descriptions instead of aborting the run.
pub struct Synthesizer<C: CompletionModel> {
    model: Option<Arc<C>>,
    config: SynthesizerConfig,
}

impl<C: CompletionModel> Synthesizer<C> {
    /// Create a synthesizer
    ///
    /// Passing `None` for the model short-circuits every call to the
    /// credentials placeholder without reaching the network.
    pub fn new(model: Option<Arc<C>>, config: SynthesizerConfig) -> Self {
        Self { model, config }
    }

    /// Describe one cluster from its raw unit texts
    pub async fn describe_cluster(&self, cluster_id: usize, unit_texts: &[&str]) -> String {
        let model = match &self.model {
            Some(model) => model,
            None => return CREDENTIALS_PLACEHOLDER.to_string(),
        };

        let combined = unit_texts.join("\n\n");
        let combined = self.bound_words(cluster_id, combined);

        let request = CompletionRequest::new(
            prompt::NARRATIVE_SYSTEM,
            prompt::narrative_prompt(&combined),
        )
        .with_max_tokens(self.config.narrative_max_tokens)
        .with_temperature(self.config.narrative_temperature);

        match model.complete(request).await {
            Ok(response) => response.trim().to_string(),
            Err(error) => {
                warn!(cluster = cluster_id, "narrative synthesis failed: {}", error);
                format!("{} {}", ERROR_PREFIX, error)
            }
        }
    }

    /// Distill one article into a six-dimension structured summary
    ///
    /// Transport and parse failures degrade to a placeholder summary.
    pub async fn summarize_article(&self, article_id: usize, article_text: &str) -> ArticleSummary {
        let model = match &self.model {
            Some(model) => model,
            None => return ArticleSummary::unavailable(),
        };

        let request = CompletionRequest::new(
            prompt::SUMMARY_SYSTEM,
            prompt::summary_prompt(article_text),
        )
        .with_max_tokens(self.config.summary_max_tokens)
        .with_temperature(self.config.summary_temperature)
        .with_json_response();

        match model.complete(request).await {
            Ok(response) => match ArticleSummary::parse(&response) {
                Some(summary) => summary,
                None => {
                    warn!(article = article_id, "summary response was not a JSON object");
                    ArticleSummary::unavailable()
                }
            },
            Err(error) => {
                warn!(article = article_id, "article summary failed: {}", error);
                ArticleSummary::unavailable()
            }
        }
    }

    /// Describe one cluster from its articles' structured summaries
    pub async fn narrative_from_summaries(
        &self,
        cluster_id: usize,
        summaries: &[(usize, ArticleSummary)],
    ) -> String {
        let model = match &self.model {
            Some(model) => model,
            None => return CREDENTIALS_PLACEHOLDER.to_string(),
        };

        let mut formatted = String::new();
        for (article_id, summary) in summaries {
            formatted.push_str(&format!("Article {}:\n", article_id));
            for line in summary.to_lines().lines() {
                formatted.push_str(&format!("- {}\n", line));
            }
            formatted.push('\n');
        }

        let request = CompletionRequest::new(
            prompt::SUMMARY_NARRATIVE_SYSTEM,
            prompt::summary_narrative_prompt(&formatted),
        )
        .with_max_tokens(self.config.summary_narrative_max_tokens)
        .with_temperature(self.config.narrative_temperature);

        match model.complete(request).await {
            Ok(response) => response.trim().to_string(),
            Err(error) => {
                warn!(cluster = cluster_id, "narrative synthesis failed: {}", error);
                format!("{} {}", ERROR_PREFIX, error)
            }
        }
    }

    /// Enforce the word ceiling on a cluster's combined text
    fn bound_words(&self, cluster_id: usize, combined: String) -> String {
        let word_count = combined.split_whitespace().count();
        if word_count <= self.config.max_corpus_words {
            return combined;
        }

        info!(
            cluster = cluster_id,
            words = word_count,
            limit = self.config.max_corpus_words,
            "truncating cluster text"
        );
        let words: Vec<&str> = combined.split_whitespace().collect();
        words[..self.config.max_corpus_words].join(" ")
    }
}
