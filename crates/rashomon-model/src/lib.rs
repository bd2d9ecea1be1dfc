//! Rashomon Model Boundary
//!
//! Implementations of the `CompletionModel` and `EmbeddingModel` traits
//! from `rashomon-domain`. The pipeline treats both as third-party
//! services with no schema guarantee beyond "text in, text/vector out".
//!
//! # Providers
//!
//! - `MockCompletionModel` / `MockEmbeddingModel`: deterministic fakes for
//!   testing, no network
//! - `OpenAiClient`: OpenAI-compatible HTTP API, implements both traits
//!
//! # Examples
//!
//! ```
//! use rashomon_model::MockCompletionModel;
//! use rashomon_domain::traits::{CompletionModel, CompletionRequest};
//!
//! # tokio_test::block_on(async {
//! let model = MockCompletionModel::new("A narrative about cables.");
//! let request = CompletionRequest::new("system", "user");
//! let result = model.complete(request).await.unwrap();
//! assert_eq!(result, "A narrative about cables.");
//! # });
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use rashomon_domain::traits::{CompletionModel, CompletionRequest, EmbeddingModel};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::{
    ModelConfig, OpenAiClient, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL,
};

/// Errors that can occur at the external model boundary
#[derive(Error, Debug)]
pub enum ModelError {
    /// Network-level failure reaching the service
    #[error("transport error: {0}")]
    Transport(String),

    /// Service replied with a non-success status
    #[error("api error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code the service returned
        status: u16,
        /// Response body, as far as it could be read
        message: String,
    },

    /// No API key configured
    #[error("credentials unavailable: {0}")]
    Credential(String),

    /// Response body did not match the expected shape
    #[error("invalid response: {0}")]
    Parse(String),
}

impl ModelError {
    /// True for failures worth retrying: network faults, rate limiting,
    /// and server-side statuses.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::Transport(_) => true,
            ModelError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// True when the service rejected or lacked credentials.
    ///
    /// Stages use this to stop burning quota on calls that cannot succeed.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ModelError::Credential(_) => true,
            ModelError::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

/// Canned reply held by the completion mock
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    TransportError(String),
    AuthError,
}

/// Mock completion model for deterministic testing
///
/// Returns pre-configured responses without any network calls. Responses
/// can be keyed on a substring of the request's user content, so one mock
/// can serve different clusters or scoring pairs in a single test. Every
/// request is recorded for later inspection.
///
/// # Examples
///
/// ```
/// use rashomon_model::MockCompletionModel;
/// use rashomon_domain::traits::{CompletionModel, CompletionRequest};
///
/// # tokio_test::block_on(async {
/// let mut model = MockCompletionModel::new("default");
/// model.add_keyed_response("storm", "0.8");
///
/// let hit = CompletionRequest::new("s", "the storm did it");
/// assert_eq!(model.complete(hit).await.unwrap(), "0.8");
///
/// let miss = CompletionRequest::new("s", "something else");
/// assert_eq!(model.complete(miss).await.unwrap(), "default");
/// assert_eq!(model.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockCompletionModel {
    default_reply: MockReply,
    keyed: Arc<Mutex<Vec<(String, MockReply)>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionModel {
    /// Create a mock with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_reply: MockReply::Text(response.into()),
            keyed: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock where every call fails with a transport error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default_reply: MockReply::TransportError(message.into()),
            keyed: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock where every call fails as if the service returned 401
    pub fn rejecting_credentials() -> Self {
        Self {
            default_reply: MockReply::AuthError,
            keyed: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` when the user content contains `needle`.
    ///
    /// Keys are checked in insertion order; the first match wins.
    pub fn add_keyed_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.keyed
            .lock()
            .unwrap()
            .push((needle.into(), MockReply::Text(response.into())));
    }

    /// Fail with a transport error when the user content contains `needle`
    pub fn add_keyed_error(&mut self, needle: impl Into<String>) {
        self.keyed.lock().unwrap().push((
            needle.into(),
            MockReply::TransportError("mock transport failure".to_string()),
        ));
    }

    /// Number of completed calls so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Copies of every request seen, in call order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for MockCompletionModel {
    type Error = ModelError;

    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let reply = {
            let keyed = self.keyed.lock().unwrap();
            keyed
                .iter()
                .find(|(needle, _)| request.user.contains(needle))
                .map(|(_, reply)| reply.clone())
                .unwrap_or_else(|| self.default_reply.clone())
        };

        self.calls.lock().unwrap().push(request);

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::TransportError(message) => Err(ModelError::Transport(message)),
            MockReply::AuthError => Err(ModelError::Api {
                status: 401,
                message: "mock credential rejection".to_string(),
            }),
        }
    }
}

/// Mock embedding model producing deterministic hash-based vectors
///
/// The vectors are:
///
/// - **Deterministic**: same text always produces the same vector
/// - **Normalized**: unit length, so distances stay well-behaved
/// - **Diverse**: different texts produce different vectors
///
/// Texts matching a registered error needle fail with a transport error
/// instead, which is how tests exercise the sentinel-vector path.
#[derive(Debug, Clone)]
pub struct MockEmbeddingModel {
    dimension: usize,
    reject_credentials: bool,
    error_needles: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockEmbeddingModel {
    /// Create a mock producing vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            reject_credentials: false,
            error_needles: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock where every call fails as if the service returned 401
    pub fn rejecting_credentials(dimension: usize) -> Self {
        Self {
            dimension,
            reject_credentials: true,
            error_needles: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Fail with a transport error for texts containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.error_needles.lock().unwrap().push(needle.into());
    }

    /// Number of embed calls so far
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The fixed output dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Hash text with a seed to get a deterministic f32 in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

#[async_trait]
impl EmbeddingModel for MockEmbeddingModel {
    type Error = ModelError;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        *self.call_count.lock().unwrap() += 1;

        if self.reject_credentials {
            return Err(ModelError::Api {
                status: 401,
                message: "mock credential rejection".to_string(),
            });
        }

        let failing = {
            let needles = self.error_needles.lock().unwrap();
            needles.iter().any(|needle| text.contains(needle))
        };
        if failing {
            return Err(ModelError::Transport("mock transport failure".to_string()));
        }

        let mut vector = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            vector.push(Self::hash_with_seed(text, i as u64));
        }

        // Normalize to unit length
        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        Ok(vector)
    }
}
