//! Core Scorer implementation

use crate::config::ScorerConfig;
use crate::parse::parse_first_number;
use rashomon_domain::traits::{CompletionModel, CompletionRequest};
use rashomon_domain::{AgreementScore, Article, Narrative};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

const SCORER_SYSTEM: &str =
    "You are an objective analyst evaluating how news articles align with specific narratives.";

/// One scored (narrative, article) pair
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// The clamped agreement score
    pub score: AgreementScore,

    /// Whether the score is a degradation default rather than a value
    /// parsed from a model response
    pub defaulted: bool,
}

/// Memoization key for one (narrative, article) pair
///
/// Hashes the narrative description and article text, so a rerun over
/// unchanged content maps to the same key regardless of ids.
pub fn pair_key(narrative: &Narrative, article: &Article) -> String {
    let mut hasher = Sha256::new();
    hasher.update(narrative.description.as_bytes());
    hasher.update([0u8]);
    hasher.update(article.text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Scores narrative/article agreement via a completion model
///
/// Scoring is infallible by policy: an unavailable model, a transport
/// failure, or an unparseable response all degrade to a neutral 0.0.
pub struct Scorer<C: CompletionModel> {
    model: Option<Arc<C>>,
    config: ScorerConfig,
}

impl<C: CompletionModel> Scorer<C> {
    /// Create a scorer
    ///
    /// Passing `None` for the model makes every pair score neutral
    /// without reaching the network.
    pub fn new(model: Option<Arc<C>>, config: ScorerConfig) -> Self {
        Self { model, config }
    }

    /// Score how much one article agrees with one narrative
    pub async fn score_pair(&self, narrative: &Narrative, article: &Article) -> ScoreOutcome {
        let model = match &self.model {
            Some(model) => model,
            None => {
                warn!(
                    narrative = narrative.id,
                    article = article.id,
                    "completion model unavailable, cannot evaluate agreement"
                );
                return self.defaulted(narrative, article);
            }
        };

        let article_text = self.bound_chars(&article.text);
        let request = CompletionRequest::new(
            SCORER_SYSTEM,
            agreement_prompt(&narrative.description, &article_text),
        )
        .with_max_tokens(self.config.max_tokens)
        .with_temperature(self.config.temperature);

        let response = match model.complete(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    narrative = narrative.id,
                    article = article.id,
                    "agreement call failed: {}",
                    error
                );
                return self.defaulted(narrative, article);
            }
        };

        match parse_first_number(response.trim()) {
            Some(value) => {
                debug!(
                    narrative = narrative.id,
                    article = article.id,
                    score = value,
                    "scored pair"
                );
                ScoreOutcome {
                    score: AgreementScore::new(narrative.id, article.id, value),
                    defaulted: false,
                }
            }
            None => {
                warn!(
                    narrative = narrative.id,
                    article = article.id,
                    "could not parse score from response: {}",
                    response.trim()
                );
                self.defaulted(narrative, article)
            }
        }
    }

    fn defaulted(&self, narrative: &Narrative, article: &Article) -> ScoreOutcome {
        ScoreOutcome {
            score: AgreementScore::neutral(narrative.id, article.id),
            defaulted: true,
        }
    }

    /// Enforce the character ceiling on article text, marking truncation
    fn bound_chars(&self, text: &str) -> String {
        if text.chars().count() <= self.config.max_article_chars {
            return text.to_string();
        }

        let truncated: String = text.chars().take(self.config.max_article_chars).collect();
        format!("{}...", truncated)
    }
}

fn agreement_prompt(narrative: &str, article_text: &str) -> String {
    format!(
        r#"Evaluate how much this article agrees or disagrees with the given narrative.

NARRATIVE: {}

ARTICLE: {}

Assign a score from -1 to 1 where:
- Scores from 0 to 1 indicate agreement (1 being complete agreement)
- Scores from 0 to -1 indicate disagreement (-1 being complete disagreement)
- 0 indicates neutrality or no relation

Return only the numerical score without any explanation."#,
        narrative, article_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rashomon_model::MockCompletionModel;

    fn scorer(mock: MockCompletionModel) -> Scorer<MockCompletionModel> {
        Scorer::new(Some(Arc::new(mock)), ScorerConfig::default())
    }

    fn narrative() -> Narrative {
        Narrative::bare(0, "A vessel dragged its anchor across the cable.")
    }

    fn article(text: &str) -> Article {
        Article::new(1, "Cable damaged", text)
    }

    #[tokio::test]
    async fn test_bare_number_response() {
        let mock = MockCompletionModel::new("0.8");
        let outcome = scorer(mock).score_pair(&narrative(), &article("text")).await;

        assert!((outcome.score.score - 0.8).abs() < 1e-12);
        assert_eq!(outcome.score.narrative_id, 0);
        assert_eq!(outcome.score.article_id, 1);
        assert!(!outcome.defaulted);
    }

    #[tokio::test]
    async fn test_chatty_response_still_parses() {
        let mock = MockCompletionModel::new("I would rate this -0.4 overall.");
        let outcome = scorer(mock).score_pair(&narrative(), &article("text")).await;

        assert!((outcome.score.score + 0.4).abs() < 1e-12);
        assert!(!outcome.defaulted);
    }

    #[tokio::test]
    async fn test_out_of_range_response_clamped() {
        let mock = MockCompletionModel::new("5");
        let outcome = scorer(mock).score_pair(&narrative(), &article("text")).await;

        assert_eq!(outcome.score.score, 1.0);
        assert!(!outcome.defaulted);
    }

    #[tokio::test]
    async fn test_unparseable_response_defaults_neutral() {
        let mock = MockCompletionModel::new("strong agreement");
        let outcome = scorer(mock).score_pair(&narrative(), &article("text")).await;

        assert_eq!(outcome.score.score, 0.0);
        assert!(outcome.defaulted);
    }

    #[tokio::test]
    async fn test_transport_error_defaults_neutral() {
        let mock = MockCompletionModel::failing("connection refused");
        let outcome = scorer(mock).score_pair(&narrative(), &article("text")).await;

        assert!(outcome.score.is_neutral());
        assert!(outcome.defaulted);
    }

    #[tokio::test]
    async fn test_missing_model_defaults_without_calling() {
        let scorer: Scorer<MockCompletionModel> = Scorer::new(None, ScorerConfig::default());
        let outcome = scorer.score_pair(&narrative(), &article("text")).await;

        assert!(outcome.score.is_neutral());
        assert!(outcome.defaulted);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let mock = MockCompletionModel::new("0.0");
        scorer(mock.clone())
            .score_pair(&narrative(), &article("the article body"))
            .await;

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 10);
        assert!((requests[0].temperature - 0.2).abs() < f32::EPSILON);
        assert!(requests[0].user.contains("NARRATIVE: A vessel dragged"));
        assert!(requests[0].user.contains("ARTICLE: the article body"));
        assert!(requests[0].user.contains("Return only the numerical score"));
    }

    #[tokio::test]
    async fn test_long_article_truncated_with_marker() {
        let mock = MockCompletionModel::new("0.1");
        let config = ScorerConfig {
            max_article_chars: 20,
            ..ScorerConfig::default()
        };
        let scorer = Scorer::new(Some(Arc::new(mock.clone())), config);

        let long_text = "abcdefghij".repeat(5);
        scorer.score_pair(&narrative(), &article(&long_text)).await;

        let requests = mock.requests();
        assert!(requests[0].user.contains("abcdefghijabcdefghij..."));
        assert!(!requests[0].user.contains(&long_text));
    }

    #[test]
    fn test_pair_key_tracks_content() {
        let a = narrative();
        let b = Narrative::bare(5, "A vessel dragged its anchor across the cable.");
        let art = article("same text");

        // Same content hashes alike even under different ids
        assert_eq!(pair_key(&a, &art), pair_key(&b, &art));

        let other = article("different text");
        assert_ne!(pair_key(&a, &art), pair_key(&a, &other));
        assert_eq!(pair_key(&a, &art).len(), 64);
    }
}
