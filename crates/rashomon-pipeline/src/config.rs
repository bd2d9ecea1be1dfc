//! Pipeline configuration
//!
//! One explicit configuration object constructed at process start and
//! passed down by value. Components never read the process environment
//! themselves; the binary resolves files, flags, and environment into
//! this struct before any stage runs.

use rashomon_model::{ModelConfig, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL};
use rashomon_scorer::ScorerConfig;
use rashomon_segment::{DEFAULT_LONG_UNIT_WORDS, DEFAULT_SHORT_PARAGRAPH_WORDS};
use rashomon_synthesizer::SynthesizerConfig;
use serde::{Deserialize, Serialize};

/// Configuration for both pipeline stages
///
/// Every section has working defaults, so an empty TOML file (or none at
/// all) yields a usable configuration.
///
/// # Examples
///
/// ```
/// use rashomon_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.cluster.min_clusters, 2);
/// assert!(config.validate().is_ok());
///
/// let partial = PipelineConfig::from_toml("[cluster]\nmax_clusters = 4\n").unwrap();
/// assert_eq!(partial.cluster.max_clusters, 4);
/// assert_eq!(partial.limits.discover_articles, 20);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Corpus caps and run-summary sampling
    pub limits: LimitsConfig,

    /// Unit segmentation thresholds
    pub segmenter: SegmenterConfig,

    /// Cluster count bounds and the clustering seed
    pub cluster: ClusterConfig,

    /// External model identifiers and call budgets
    pub model: ModelSettings,

    /// Narrative synthesis ceilings
    pub synthesizer: SynthesizerConfig,

    /// Agreement scoring ceilings
    pub scorer: ScorerConfig,
}

/// Article caps per stage and run-summary sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// How many corpus rows the discovery stage loads; 0 means unlimited
    pub discover_articles: usize,

    /// How many corpus rows the scoring stage loads; 0 means unlimited
    pub score_articles: usize,

    /// Sample units kept per narrative for the run summary
    pub sample_units: usize,

    /// Characters kept per sample unit
    pub sample_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            discover_articles: 20,
            score_articles: 10,
            sample_units: 5,
            sample_chars: 100,
        }
    }
}

/// Word thresholds for the unit segmenter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Paragraphs under this many words merge with their successor
    pub short_paragraph_words: usize,

    /// Units over this many words split into sentences
    pub long_unit_words: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            short_paragraph_words: DEFAULT_SHORT_PARAGRAPH_WORDS,
            long_unit_words: DEFAULT_LONG_UNIT_WORDS,
        }
    }
}

/// Bounds and seed for cluster-count selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Smallest cluster count considered
    pub min_clusters: usize,

    /// Largest cluster count considered
    pub max_clusters: usize,

    /// Seed for the k-means search, explicit so runs are reproducible
    pub seed: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_clusters: 2,
            max_clusters: 10,
            seed: 42,
        }
    }
}

/// External model identifiers and per-call budgets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Base URL of the model API
    pub base_url: String,

    /// Completion model identifier
    pub chat_model: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Per-request timeout in seconds; always finite
    pub timeout_secs: u64,

    /// Attempts per call before degrading to a sentinel
    pub max_retries: u32,

    /// In-flight request ceiling for the stage worker pools
    pub max_concurrent_requests: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout_secs: 60,
            max_retries: 3,
            max_concurrent_requests: 8,
        }
    }
}

impl ModelSettings {
    /// The HTTP client configuration these settings describe
    pub fn client_config(&self) -> ModelConfig {
        ModelConfig {
            base_url: self.base_url.clone(),
            chat_model: self.chat_model.clone(),
            embedding_model: self.embedding_model.clone(),
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cluster.min_clusters == 0 {
            return Err("cluster.min_clusters must be greater than 0".to_string());
        }
        if self.cluster.max_clusters < self.cluster.min_clusters {
            return Err("cluster.max_clusters cannot be below cluster.min_clusters".to_string());
        }
        if self.segmenter.short_paragraph_words == 0 {
            return Err("segmenter.short_paragraph_words must be greater than 0".to_string());
        }
        if self.segmenter.long_unit_words <= self.segmenter.short_paragraph_words {
            return Err(
                "segmenter.long_unit_words must exceed segmenter.short_paragraph_words"
                    .to_string(),
            );
        }
        if self.model.chat_model.trim().is_empty() {
            return Err("model.chat_model must not be empty".to_string());
        }
        if self.model.embedding_model.trim().is_empty() {
            return Err("model.embedding_model must not be empty".to_string());
        }
        if self.model.timeout_secs == 0 {
            return Err("model.timeout_secs must be greater than 0".to_string());
        }
        if self.model.max_retries == 0 {
            return Err("model.max_retries must be greater than 0".to_string());
        }
        if self.model.max_concurrent_requests == 0 {
            return Err("model.max_concurrent_requests must be greater than 0".to_string());
        }
        self.synthesizer.validate()?;
        self.scorer.validate()?;
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.limits.discover_articles, 20);
        assert_eq!(config.limits.score_articles, 10);
        assert_eq!(config.limits.sample_units, 5);
        assert_eq!(config.limits.sample_chars, 100);
        assert_eq!(config.segmenter.short_paragraph_words, 20);
        assert_eq!(config.segmenter.long_unit_words, 200);
        assert_eq!(config.cluster.min_clusters, 2);
        assert_eq!(config.cluster.max_clusters, 10);
        assert_eq!(config.cluster.seed, 42);
        assert_eq!(config.model.timeout_secs, 60);
        assert_eq!(config.model.max_retries, 3);
        assert_eq!(config.model.max_concurrent_requests, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_inverted_cluster_bounds() {
        let mut config = PipelineConfig::default();
        config.cluster.min_clusters = 8;
        config.cluster.max_clusters = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_concurrency() {
        let mut config = PipelineConfig::default();
        config.model.max_concurrent_requests = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_reaches_nested_sections() {
        let mut config = PipelineConfig::default();
        config.scorer.temperature = 9.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(parsed.cluster.seed, config.cluster.seed);
        assert_eq!(parsed.model.chat_model, config.model.chat_model);
        assert_eq!(parsed.scorer.max_article_chars, config.scorer.max_article_chars);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = PipelineConfig::from_toml(
            "[cluster]\nmin_clusters = 3\n\n[limits]\ndiscover_articles = 0\n",
        )
        .unwrap();

        assert_eq!(config.cluster.min_clusters, 3);
        assert_eq!(config.cluster.max_clusters, 10);
        assert_eq!(config.limits.discover_articles, 0);
        assert_eq!(config.limits.score_articles, 10);
        assert_eq!(config.model.max_retries, 3);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config.cluster.min_clusters, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_config_projection() {
        let mut config = PipelineConfig::default();
        config.model.timeout_secs = 15;
        let client = config.model.client_config();
        assert_eq!(client.timeout_secs, 15);
        assert_eq!(client.base_url, config.model.base_url);
    }
}
