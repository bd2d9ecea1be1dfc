//! Discovery stage: corpus in, narratives out
//!
//! Units mode segments every article and clusters per-unit embeddings;
//! summary mode condenses each article to a structured summary first and
//! clusters one vector per article. Both modes end in narrative
//! synthesis over the chosen clusters and produce the same output shape.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::gate::CredentialGate;
use crate::metrics::DiscoveryMetrics;
use futures::future::join_all;
use rashomon_cluster::ClusterSelector;
use rashomon_domain::traits::{CompletionModel, EmbeddingModel};
use rashomon_domain::{group_assignments, Article, Cluster, Embedding, Narrative, RunId, Unit};
use rashomon_model::ModelError;
use rashomon_segment::Segmenter;
use rashomon_synthesizer::{is_placeholder, ArticleSummary, Synthesizer};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Which discovery path to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryMode {
    /// Cluster one embedding per segmented unit
    #[default]
    Units,

    /// Cluster one embedding per structured article summary
    Summary,
}

/// Everything one discovery run produced
#[derive(Debug)]
pub struct DiscoveryOutcome {
    /// Identity of this run
    pub run_id: RunId,

    /// Synthesized narratives, ordered by cluster id
    pub narratives: Vec<Narrative>,

    /// Mean silhouette of the chosen clustering, when one was scored
    pub quality: Option<f64>,

    /// Degradation accounting for the run
    pub metrics: DiscoveryMetrics,
}

/// Orchestrates segmentation, embedding, clustering, and synthesis
///
/// Either model handle may be absent; the stage still completes and the
/// affected calls degrade to their documented sentinels.
pub struct DiscoveryStage<C, E> {
    completion: Option<Arc<C>>,
    embedding: Option<Arc<E>>,
    config: PipelineConfig,
}

impl<C, E> DiscoveryStage<C, E>
where
    C: CompletionModel<Error = ModelError> + 'static,
    E: EmbeddingModel<Error = ModelError> + 'static,
{
    /// Create a discovery stage over the given model handles
    pub fn new(
        completion: Option<Arc<C>>,
        embedding: Option<Arc<E>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            completion,
            embedding,
            config,
        }
    }

    /// Run discovery over the given articles
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration, malformed embedding
    /// output reaching the cluster selector, or a stage task that did not
    /// run to completion. Per-call model failures are not errors here;
    /// they degrade to sentinels and show up in the outcome's metrics.
    pub async fn run(
        &self,
        articles: &[Article],
        mode: DiscoveryMode,
    ) -> Result<DiscoveryOutcome, PipelineError> {
        self.config.validate().map_err(PipelineError::Config)?;

        let run_id = RunId::new();
        let mut metrics = DiscoveryMetrics::new();
        metrics.articles_loaded = articles.len();

        info!(
            run = %run_id,
            mode = ?mode,
            articles = articles.len(),
            "discovery stage starting"
        );

        let tripped = Arc::new(AtomicBool::new(false));
        let completion = self
            .completion
            .as_ref()
            .map(|model| Arc::new(CredentialGate::new(Arc::clone(model), Arc::clone(&tripped))));
        let embedding = self
            .embedding
            .as_ref()
            .map(|model| Arc::new(CredentialGate::new(Arc::clone(model), Arc::clone(&tripped))));

        if completion.is_none() {
            warn!("no completion model configured, narratives degrade to placeholders");
        }
        let synthesizer = Arc::new(Synthesizer::new(completion, self.config.synthesizer.clone()));

        let (narratives, quality) = match mode {
            DiscoveryMode::Units => {
                self.discover_units(articles, embedding.as_ref(), &synthesizer, &mut metrics)
                    .await?
            }
            DiscoveryMode::Summary => {
                self.discover_summaries(articles, embedding.as_ref(), &synthesizer, &mut metrics)
                    .await?
            }
        };

        metrics.narratives_synthesized = narratives.len();
        metrics.narratives_placeholder = narratives
            .iter()
            .filter(|narrative| is_placeholder(&narrative.description))
            .count();

        info!(run = %run_id, "discovery stage complete\n{}", metrics.summary());

        Ok(DiscoveryOutcome {
            run_id,
            narratives,
            quality,
            metrics,
        })
    }

    /// Per-unit path: segment, embed each unit, cluster, synthesize
    async fn discover_units(
        &self,
        articles: &[Article],
        embedding: Option<&Arc<CredentialGate<E>>>,
        synthesizer: &Arc<Synthesizer<CredentialGate<C>>>,
        metrics: &mut DiscoveryMetrics,
    ) -> Result<(Vec<Narrative>, Option<f64>), PipelineError> {
        let segmenter = Segmenter::new(
            self.config.segmenter.short_paragraph_words,
            self.config.segmenter.long_unit_words,
        );
        let units: Vec<Unit> = articles
            .iter()
            .flat_map(|article| segmenter.segment_article(article))
            .collect();
        metrics.units_segmented = units.len();

        if units.is_empty() {
            warn!("corpus produced no units, nothing to cluster");
            return Ok((Vec::new(), None));
        }

        let texts: Vec<String> = units.iter().map(|unit| unit.text().to_string()).collect();
        let embeddings = self.embed_texts(embedding, texts, metrics).await?;
        let (clusters, quality) = self.select_clusters(&embeddings)?;
        info!(
            units = units.len(),
            clusters = clusters.len(),
            "clustered unit embeddings"
        );

        let mut narratives = Vec::with_capacity(clusters.len());
        for cluster in &clusters {
            let member_texts: Vec<&str> = cluster
                .members
                .iter()
                .map(|&index| units[index].text())
                .collect();
            let description = synthesizer.describe_cluster(cluster.id, &member_texts).await;
            let samples = member_texts
                .iter()
                .take(self.config.limits.sample_units)
                .map(|text| self.sample(text))
                .collect();
            narratives.push(Narrative::new(cluster.id, description, samples, cluster.len()));
        }

        Ok((narratives, quality))
    }

    /// Per-article path: summarize, embed each summary, cluster, synthesize
    async fn discover_summaries(
        &self,
        articles: &[Article],
        embedding: Option<&Arc<CredentialGate<E>>>,
        synthesizer: &Arc<Synthesizer<CredentialGate<C>>>,
        metrics: &mut DiscoveryMetrics,
    ) -> Result<(Vec<Narrative>, Option<f64>), PipelineError> {
        if articles.is_empty() {
            warn!("no articles to summarize");
            return Ok((Vec::new(), None));
        }

        let summaries = self
            .summarize_articles(articles, synthesizer, metrics)
            .await?;
        let texts: Vec<String> = summaries.iter().map(ArticleSummary::to_lines).collect();
        let embeddings = self.embed_texts(embedding, texts, metrics).await?;
        let (clusters, quality) = self.select_clusters(&embeddings)?;
        info!(
            articles = articles.len(),
            clusters = clusters.len(),
            "clustered article summaries"
        );

        let mut narratives = Vec::with_capacity(clusters.len());
        for cluster in &clusters {
            let members: Vec<(usize, ArticleSummary)> = cluster
                .members
                .iter()
                .map(|&index| (articles[index].id, summaries[index].clone()))
                .collect();
            let description = synthesizer.narrative_from_summaries(cluster.id, &members).await;
            let samples = cluster
                .members
                .iter()
                .take(self.config.limits.sample_units)
                .map(|&index| self.sample(&summaries[index].to_lines()))
                .collect();
            narratives.push(Narrative::new(cluster.id, description, samples, cluster.len()));
        }

        Ok((narratives, quality))
    }

    /// Request structured summaries for every article through a bounded
    /// worker pool, degrading failures to the "unavailable" placeholder.
    async fn summarize_articles(
        &self,
        articles: &[Article],
        synthesizer: &Arc<Synthesizer<CredentialGate<C>>>,
        metrics: &mut DiscoveryMetrics,
    ) -> Result<Vec<ArticleSummary>, PipelineError> {
        metrics.summaries_attempted = articles.len();

        let semaphore = Arc::new(Semaphore::new(self.config.model.max_concurrent_requests));
        let mut handles = Vec::with_capacity(articles.len());
        for (index, article) in articles.iter().enumerate() {
            let synthesizer = Arc::clone(synthesizer);
            let permits = Arc::clone(&semaphore);
            let article_id = article.id;
            let text = article.text.clone();
            handles.push(tokio::spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (index, ArticleSummary::unavailable()),
                };
                (index, synthesizer.summarize_article(article_id, &text).await)
            }));
        }

        let mut summaries = vec![ArticleSummary::unavailable(); articles.len()];
        for handle in join_all(handles).await {
            let (index, summary) = handle.map_err(|e| PipelineError::Task(e.to_string()))?;
            summaries[index] = summary;
        }

        metrics.summaries_degraded = summaries
            .iter()
            .filter(|summary| summary.is_placeholder())
            .count();
        if metrics.summaries_degraded > 0 {
            warn!(
                degraded = metrics.summaries_degraded,
                total = articles.len(),
                "article summaries degraded to placeholders"
            );
        }

        Ok(summaries)
    }

    /// Embed every text through a bounded worker pool.
    ///
    /// Failed calls yield sentinel embeddings at their original positions;
    /// the caller filters them out before clustering.
    async fn embed_texts(
        &self,
        model: Option<&Arc<CredentialGate<E>>>,
        texts: Vec<String>,
        metrics: &mut DiscoveryMetrics,
    ) -> Result<Vec<Embedding>, PipelineError> {
        let count = texts.len();
        metrics.embeddings_attempted += count;

        let model = match model {
            Some(model) => model,
            None => {
                warn!(
                    texts = count,
                    "no embedding model configured, all embeddings degrade to sentinels"
                );
                metrics.embeddings_degraded += count;
                return Ok((0..count).map(Embedding::sentinel).collect());
            }
        };

        let semaphore = Arc::new(Semaphore::new(self.config.model.max_concurrent_requests));
        let mut handles = Vec::with_capacity(count);
        for (index, text) in texts.into_iter().enumerate() {
            let model = Arc::clone(model);
            let permits = Arc::clone(&semaphore);
            handles.push(tokio::spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Embedding::sentinel(index),
                };
                match model.embed(&text).await {
                    Ok(vector) => Embedding::new(index, vector),
                    Err(error) => {
                        warn!(unit = index, "embedding failed, using sentinel: {}", error);
                        Embedding::sentinel(index)
                    }
                }
            }));
        }

        let mut embeddings: Vec<Embedding> = (0..count).map(Embedding::sentinel).collect();
        for handle in join_all(handles).await {
            let embedding = handle.map_err(|e| PipelineError::Task(e.to_string()))?;
            let slot = embedding.unit_index;
            embeddings[slot] = embedding;
        }

        let degraded = embeddings
            .iter()
            .filter(|embedding| !embedding.is_usable())
            .count();
        metrics.embeddings_degraded += degraded;
        if degraded > 0 {
            warn!(degraded, total = count, "embeddings degraded to sentinel vectors");
        }

        Ok(embeddings)
    }

    /// Run cluster selection over the usable embeddings, mapping member
    /// positions back to the caller's original indices.
    fn select_clusters(
        &self,
        embeddings: &[Embedding],
    ) -> Result<(Vec<Cluster>, Option<f64>), PipelineError> {
        let mut usable_indices = Vec::new();
        let mut usable_vectors: Vec<Vec<f64>> = Vec::new();
        for embedding in embeddings {
            if !embedding.is_usable() {
                continue;
            }
            usable_indices.push(embedding.unit_index);
            usable_vectors.push(
                embedding
                    .vector
                    .iter()
                    .map(|&value| f64::from(value))
                    .collect(),
            );
        }

        let selector = ClusterSelector::new(
            self.config.cluster.min_clusters,
            self.config.cluster.max_clusters,
            self.config.cluster.seed,
        );
        let selection = selector.select(&usable_vectors)?;
        let quality = selection.quality();

        let clusters = group_assignments(selection.assignments())
            .into_iter()
            .map(|cluster| {
                let members = cluster
                    .members
                    .iter()
                    .map(|&position| usable_indices[position])
                    .collect();
                Cluster::new(cluster.id, members)
            })
            .collect();

        Ok((clusters, quality))
    }

    /// First characters of a text, for run-summary samples
    fn sample(&self, text: &str) -> String {
        text.chars().take(self.config.limits.sample_chars).collect()
    }
}
