//! Scoring stage: narratives x articles in, agreement scores out
//!
//! Every (narrative, article) pair is scored independently, so the stage
//! fans the misses out over a bounded worker pool and fans results back
//! into a dense matrix in narrative-major order. The score cache is
//! consulted first and fed back after, keyed on pair content.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::gate::CredentialGate;
use crate::metrics::ScoringMetrics;
use futures::future::join_all;
use rashomon_domain::traits::CompletionModel;
use rashomon_domain::{AgreementScore, Article, Narrative, RunId};
use rashomon_model::ModelError;
use rashomon_scorer::{pair_key, ScoreOutcome, Scorer};
use rashomon_store::ScoreCache;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Everything one scoring run produced
#[derive(Debug)]
pub struct ScoringOutcome {
    /// Identity of this run
    pub run_id: RunId,

    /// One score per (narrative, article) pair, narrative-major
    pub scores: Vec<AgreementScore>,

    /// Degradation and cache accounting for the run
    pub metrics: ScoringMetrics,
}

/// A pair that missed the cache and needs a model call
struct PendingPair {
    slot: usize,
    narrative_index: usize,
    article_index: usize,
    key: String,
}

/// Orchestrates cache lookups and scorer fan-out
///
/// The model handle may be absent; every pair then degrades to the
/// neutral score and the stage still completes.
pub struct ScoringStage<C> {
    completion: Option<Arc<C>>,
    config: PipelineConfig,
}

impl<C> ScoringStage<C>
where
    C: CompletionModel<Error = ModelError> + 'static,
{
    /// Create a scoring stage over the given model handle
    pub fn new(completion: Option<Arc<C>>, config: PipelineConfig) -> Self {
        Self { completion, config }
    }

    /// Score every narrative against every article
    ///
    /// With `use_cache` set, pairs whose content hash is already cached
    /// skip the model entirely. Fresh non-defaulted scores are written
    /// back to the cache either way; defaulted scores are not, so a
    /// degraded run does not poison later reruns.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration or a scoring task
    /// that did not run to completion. Per-pair model failures degrade to
    /// the neutral score and show up in the outcome's metrics.
    pub async fn run(
        &self,
        narratives: &[Narrative],
        articles: &[Article],
        cache: &mut ScoreCache,
        use_cache: bool,
    ) -> Result<ScoringOutcome, PipelineError> {
        self.config.validate().map_err(PipelineError::Config)?;

        let run_id = RunId::new();
        let mut metrics = ScoringMetrics::new();
        metrics.narratives_loaded = narratives.len();
        metrics.articles_loaded = articles.len();

        info!(
            run = %run_id,
            narratives = narratives.len(),
            articles = articles.len(),
            use_cache,
            "scoring stage starting"
        );

        let tripped = Arc::new(AtomicBool::new(false));
        let gated = self
            .completion
            .as_ref()
            .map(|model| Arc::new(CredentialGate::new(Arc::clone(model), tripped)));
        let scorer = Arc::new(Scorer::new(gated, self.config.scorer.clone()));

        let mut scores: Vec<AgreementScore> = Vec::with_capacity(narratives.len() * articles.len());
        let mut pending: Vec<PendingPair> = Vec::new();
        for (narrative_index, narrative) in narratives.iter().enumerate() {
            for (article_index, article) in articles.iter().enumerate() {
                let key = pair_key(narrative, article);
                if use_cache {
                    if let Some(cached) = cache.get(&key) {
                        metrics.cache_hits += 1;
                        debug!(narrative = narrative.id, article = article.id, "score cache hit");
                        scores.push(AgreementScore::new(narrative.id, article.id, cached));
                        continue;
                    }
                }
                pending.push(PendingPair {
                    slot: scores.len(),
                    narrative_index,
                    article_index,
                    key,
                });
                // Placeholder until the task result lands
                scores.push(AgreementScore::neutral(narrative.id, article.id));
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.config.model.max_concurrent_requests));
        let mut handles = Vec::with_capacity(pending.len());
        for pair in pending {
            let scorer = Arc::clone(&scorer);
            let permits = Arc::clone(&semaphore);
            let narrative = narratives[pair.narrative_index].clone();
            let article = articles[pair.article_index].clone();
            handles.push(tokio::spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        let outcome = ScoreOutcome {
                            score: AgreementScore::neutral(narrative.id, article.id),
                            defaulted: true,
                        };
                        return (pair, outcome);
                    }
                };
                let outcome = scorer.score_pair(&narrative, &article).await;
                (pair, outcome)
            }));
        }

        for handle in join_all(handles).await {
            let (pair, outcome) = handle.map_err(|e| PipelineError::Task(e.to_string()))?;
            if outcome.defaulted {
                metrics.pairs_defaulted += 1;
            } else {
                cache.insert(pair.key, outcome.score.score);
            }
            scores[pair.slot] = outcome.score;
        }
        metrics.pairs_scored = scores.len();

        info!(run = %run_id, "scoring stage complete\n{}", metrics.summary());

        Ok(ScoringOutcome {
            run_id,
            scores,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rashomon_model::MockCompletionModel;

    fn narrative(id: usize, description: &str) -> Narrative {
        Narrative::bare(id, description)
    }

    fn article(id: usize, text: &str) -> Article {
        Article::new(id, format!("Article {}", id), text)
    }

    fn fixtures() -> (Vec<Narrative>, Vec<Article>) {
        let narratives = vec![
            narrative(0, "A storm damaged the cable."),
            narrative(1, "Sabotage severed the cable."),
        ];
        let articles = vec![
            article(0, "Weather services confirmed a severe storm that night."),
            article(1, "Investigators suspect a vessel dragged its anchor deliberately."),
        ];
        (narratives, articles)
    }

    #[tokio::test]
    async fn test_scoring_end_to_end() {
        let (narratives, articles) = fixtures();
        let completion = Arc::new(MockCompletionModel::new("0.5"));
        let stage = ScoringStage::new(Some(Arc::clone(&completion)), PipelineConfig::default());
        let mut cache = ScoreCache::new();

        let outcome = stage
            .run(&narratives, &articles, &mut cache, true)
            .await
            .unwrap();

        assert_eq!(outcome.scores.len(), 4);
        assert!(outcome.scores.iter().all(|s| s.score == 0.5));
        assert_eq!(outcome.metrics.pairs_scored, 4);
        assert_eq!(outcome.metrics.pairs_defaulted, 0);
        assert_eq!(outcome.metrics.cache_hits, 0);
        assert_eq!(completion.call_count(), 4);
        assert_eq!(cache.len(), 4);
    }

    #[tokio::test]
    async fn test_scores_stay_in_narrative_major_order() {
        let narratives = vec![narrative(0, "Only narrative.")];
        let articles = vec![
            article(0, "alpha text for the first article"),
            article(1, "beta text for the second article"),
        ];
        let mut completion = MockCompletionModel::new("0.0");
        completion.add_keyed_response("alpha", "0.1");
        completion.add_keyed_response("beta", "0.9");
        let stage = ScoringStage::new(Some(Arc::new(completion)), PipelineConfig::default());
        let mut cache = ScoreCache::new();

        let outcome = stage
            .run(&narratives, &articles, &mut cache, true)
            .await
            .unwrap();

        assert_eq!(outcome.scores.len(), 2);
        assert_eq!(outcome.scores[0].article_id, 0);
        assert_eq!(outcome.scores[0].score, 0.1);
        assert_eq!(outcome.scores[1].article_id, 1);
        assert_eq!(outcome.scores[1].score, 0.9);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_the_model() {
        let (narratives, articles) = fixtures();
        let completion = Arc::new(MockCompletionModel::new("0.5"));
        let stage = ScoringStage::new(Some(Arc::clone(&completion)), PipelineConfig::default());

        let mut cache = ScoreCache::new();
        cache.insert(pair_key(&narratives[0], &articles[0]), 0.9);

        let outcome = stage
            .run(&narratives, &articles, &mut cache, true)
            .await
            .unwrap();

        assert_eq!(outcome.metrics.cache_hits, 1);
        assert_eq!(outcome.metrics.model_calls(), 3);
        assert_eq!(completion.call_count(), 3);

        // The cached pair keeps its cached value
        assert_eq!(outcome.scores[0].narrative_id, 0);
        assert_eq!(outcome.scores[0].article_id, 0);
        assert_eq!(outcome.scores[0].score, 0.9);
    }

    #[tokio::test]
    async fn test_no_cache_bypasses_reads_but_still_writes() {
        let (narratives, articles) = fixtures();
        let completion = Arc::new(MockCompletionModel::new("0.2"));
        let stage = ScoringStage::new(Some(Arc::clone(&completion)), PipelineConfig::default());

        let mut cache = ScoreCache::new();
        let stale_key = pair_key(&narratives[0], &articles[0]);
        cache.insert(stale_key.clone(), 0.9);

        let outcome = stage
            .run(&narratives, &articles, &mut cache, false)
            .await
            .unwrap();

        assert_eq!(outcome.metrics.cache_hits, 0);
        assert_eq!(completion.call_count(), 4);
        assert_eq!(outcome.scores[0].score, 0.2);
        // The fresh score overwrites the stale cache entry
        assert_eq!(cache.get(&stale_key), Some(0.2));
    }

    #[tokio::test]
    async fn test_defaulted_pairs_are_not_cached() {
        let (narratives, articles) = fixtures();
        let completion = Arc::new(MockCompletionModel::failing("service down"));
        let stage = ScoringStage::new(Some(completion), PipelineConfig::default());
        let mut cache = ScoreCache::new();

        let outcome = stage
            .run(&narratives, &articles, &mut cache, true)
            .await
            .unwrap();

        assert_eq!(outcome.metrics.pairs_defaulted, 4);
        assert!(outcome.scores.iter().all(|s| s.score == 0.0));
        assert!(cache.is_empty(), "neutral defaults must not poison the cache");
    }

    #[tokio::test]
    async fn test_missing_model_defaults_every_pair() {
        let (narratives, articles) = fixtures();
        let stage = ScoringStage::<MockCompletionModel>::new(None, PipelineConfig::default());
        let mut cache = ScoreCache::new();

        let outcome = stage
            .run(&narratives, &articles, &mut cache, true)
            .await
            .unwrap();

        assert_eq!(outcome.scores.len(), 4);
        assert_eq!(outcome.metrics.pairs_defaulted, 4);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_credential_rejection_defaults_remaining_pairs() {
        let (narratives, articles) = fixtures();
        let completion = Arc::new(MockCompletionModel::rejecting_credentials());
        let stage = ScoringStage::new(Some(Arc::clone(&completion)), PipelineConfig::default());
        let mut cache = ScoreCache::new();

        let outcome = stage
            .run(&narratives, &articles, &mut cache, true)
            .await
            .unwrap();

        assert_eq!(outcome.metrics.pairs_defaulted, 4);
        assert!(outcome.scores.iter().all(|s| s.score == 0.0));
        assert!(completion.call_count() >= 1);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_empty_inputs_produce_empty_outcome() {
        let stage = ScoringStage::<MockCompletionModel>::new(None, PipelineConfig::default());
        let mut cache = ScoreCache::new();

        let outcome = stage.run(&[], &[], &mut cache, true).await.unwrap();

        assert!(outcome.scores.is_empty());
        assert_eq!(outcome.metrics.pairs_scored, 0);
    }

    #[tokio::test]
    async fn test_rerun_hits_the_cache_completely() {
        let (narratives, articles) = fixtures();
        let completion = Arc::new(MockCompletionModel::new("0.7"));
        let stage = ScoringStage::new(Some(Arc::clone(&completion)), PipelineConfig::default());
        let mut cache = ScoreCache::new();

        stage
            .run(&narratives, &articles, &mut cache, true)
            .await
            .unwrap();
        assert_eq!(completion.call_count(), 4);

        let second = stage
            .run(&narratives, &articles, &mut cache, true)
            .await
            .unwrap();

        assert_eq!(second.metrics.cache_hits, 4);
        assert_eq!(completion.call_count(), 4, "no new model calls on rerun");
        assert!(second.scores.iter().all(|s| s.score == 0.7));
    }
}
