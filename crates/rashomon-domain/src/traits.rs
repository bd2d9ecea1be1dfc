//! Capability interfaces for the external model boundary
//!
//! The pipeline reaches the outside world only through these traits.
//! Infrastructure implementations live in rashomon-model; deterministic
//! fakes back the tests. Neither service guarantees more than "text in,
//! text/vector out", which is why downstream parsing is defensive.

use async_trait::async_trait;

/// One bounded text-generation request.
///
/// Carries everything a call needs so implementations hold no per-call
/// state: instruction framing, the material to analyze, and the sampling
/// limits that keep the response bounded.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System role text framing the task
    pub system: String,

    /// User content carrying the material to analyze
    pub user: String,

    /// Hard ceiling on response tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Ask the service for a JSON object response
    pub json_response: bool,
}

impl CompletionRequest {
    /// Create a request with the given instruction framing and default
    /// sampling limits
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens: 256,
            temperature: 0.7,
            json_response: false,
        }
    }

    /// Set the response token ceiling
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Request a JSON object response from the service
    pub fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }
}

/// Trait for text-generation calls
///
/// Implemented by the infrastructure layer (rashomon-model)
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Error type for completion calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce free text for a bounded request
    async fn complete(&self, request: CompletionRequest) -> Result<String, Self::Error>;
}

/// Trait for embedding calls
///
/// Implemented by the infrastructure layer (rashomon-model)
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Error type for embedding calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Map text to a fixed-length float vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error>;
}
