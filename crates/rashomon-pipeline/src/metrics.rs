//! Degradation accounting for pipeline stages
//!
//! A partially degraded run still produces complete output files, so the
//! counts here are the only way to judge how much of a run is real model
//! output versus sentinel filler.

/// Metrics collected during one discovery run
#[derive(Debug, Clone, Default)]
pub struct DiscoveryMetrics {
    /// Articles handed to the stage
    pub articles_loaded: usize,

    /// Units produced by segmentation (units mode)
    pub units_segmented: usize,

    /// Embedding calls attempted
    pub embeddings_attempted: usize,

    /// Embedding calls that degraded to sentinel vectors
    pub embeddings_degraded: usize,

    /// Structured summaries attempted (summary mode)
    pub summaries_attempted: usize,

    /// Summaries that degraded to the "unavailable" placeholder
    pub summaries_degraded: usize,

    /// Narratives synthesized, placeholders included
    pub narratives_synthesized: usize,

    /// Narratives that are degradation placeholders
    pub narratives_placeholder: usize,
}

impl DiscoveryMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any call in the run degraded to a sentinel
    pub fn has_degradation(&self) -> bool {
        self.embeddings_degraded > 0
            || self.summaries_degraded > 0
            || self.narratives_placeholder > 0
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Articles loaded: {}", self.articles_loaded),
            format!("Units segmented: {}", self.units_segmented),
            format!(
                "Embeddings: {} attempted, {} degraded",
                self.embeddings_attempted, self.embeddings_degraded
            ),
        ];

        if self.summaries_attempted > 0 {
            lines.push(format!(
                "Summaries: {} attempted, {} degraded",
                self.summaries_attempted, self.summaries_degraded
            ));
        }

        lines.push(format!(
            "Narratives: {} synthesized, {} placeholder",
            self.narratives_synthesized, self.narratives_placeholder
        ));

        lines.join("\n")
    }
}

/// Metrics collected during one scoring run
#[derive(Debug, Clone, Default)]
pub struct ScoringMetrics {
    /// Narratives scored against the corpus
    pub narratives_loaded: usize,

    /// Articles scored against the narratives
    pub articles_loaded: usize,

    /// Pairs in the output, cache hits included
    pub pairs_scored: usize,

    /// Pairs that degraded to the neutral score
    pub pairs_defaulted: usize,

    /// Pairs answered from the score cache without a model call
    pub cache_hits: usize,
}

impl ScoringMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs that actually reached the model
    pub fn model_calls(&self) -> usize {
        self.pairs_scored.saturating_sub(self.cache_hits)
    }

    /// True when any pair degraded to the neutral score
    pub fn has_degradation(&self) -> bool {
        self.pairs_defaulted > 0
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = vec![
            format!(
                "Pairs: {} narratives x {} articles = {} scored",
                self.narratives_loaded, self.articles_loaded, self.pairs_scored
            ),
            format!("Cache hits: {}", self.cache_hits),
            format!("Model calls: {}", self.model_calls()),
            format!("Defaulted to neutral: {}", self.pairs_defaulted),
        ];
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_metrics_creation() {
        let metrics = DiscoveryMetrics::new();
        assert_eq!(metrics.embeddings_attempted, 0);
        assert!(!metrics.has_degradation());
    }

    #[test]
    fn test_discovery_degradation_flag() {
        let mut metrics = DiscoveryMetrics::new();
        assert!(!metrics.has_degradation());

        metrics.embeddings_degraded = 1;
        assert!(metrics.has_degradation());

        metrics.embeddings_degraded = 0;
        metrics.narratives_placeholder = 2;
        assert!(metrics.has_degradation());
    }

    #[test]
    fn test_discovery_summary_hides_unused_mode() {
        let mut metrics = DiscoveryMetrics::new();
        metrics.articles_loaded = 3;
        metrics.units_segmented = 18;
        metrics.embeddings_attempted = 18;

        let summary = metrics.summary();
        assert!(summary.contains("Articles loaded: 3"));
        assert!(summary.contains("Units segmented: 18"));
        assert!(!summary.contains("Summaries:"));

        metrics.summaries_attempted = 3;
        assert!(metrics.summary().contains("Summaries: 3 attempted"));
    }

    #[test]
    fn test_scoring_model_calls() {
        let mut metrics = ScoringMetrics::new();
        metrics.pairs_scored = 20;
        metrics.cache_hits = 8;
        assert_eq!(metrics.model_calls(), 12);
    }

    #[test]
    fn test_scoring_summary() {
        let mut metrics = ScoringMetrics::new();
        metrics.narratives_loaded = 4;
        metrics.articles_loaded = 10;
        metrics.pairs_scored = 40;
        metrics.cache_hits = 10;
        metrics.pairs_defaulted = 2;

        let summary = metrics.summary();
        assert!(summary.contains("4 narratives x 10 articles = 40 scored"));
        assert!(summary.contains("Cache hits: 10"));
        assert!(summary.contains("Model calls: 30"));
        assert!(summary.contains("Defaulted to neutral: 2"));
    }
}
