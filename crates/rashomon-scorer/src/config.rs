//! Configuration for agreement scoring

use serde::{Deserialize, Serialize};

/// Configuration for the Scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Character ceiling for article text sent to the model
    pub max_article_chars: usize,

    /// Output-token ceiling; a bare number needs very few
    pub max_tokens: u32,

    /// Sampling temperature for scoring completions
    pub temperature: f32,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            max_article_chars: 15_000,
            max_tokens: 10,
            temperature: 0.2,
        }
    }
}

impl ScorerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_article_chars == 0 {
            return Err("max_article_chars must be greater than 0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be in [0, 2]".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_article_chars, 15_000);
        assert_eq!(config.max_tokens, 10);
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        let config = ScorerConfig {
            max_article_chars: 0,
            ..ScorerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
