//! OpenAI-compatible API client
//!
//! One client implements both capability traits: chat completions for
//! narrative synthesis and agreement scoring, embeddings for unit vectors.
//! Transient failures are retried with exponential backoff before the
//! caller ever sees them; everything else surfaces as a `ModelError` for
//! the caller's sentinel policy to absorb.

use crate::ModelError;
use async_trait::async_trait;
use rashomon_domain::traits::{CompletionModel, CompletionRequest, EmbeddingModel};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model for synthesis and scoring
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Default timeout for API requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Connection settings for the OpenAI-compatible API
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the API (override for proxies or compatible services)
    pub base_url: String,

    /// Model used for chat completions
    pub chat_model: String,

    /// Model used for embeddings
    pub embedding_model: String,

    /// Per-request timeout in seconds; always finite
    pub timeout_secs: u64,

    /// Attempts per call before giving up
    pub max_retries: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Client for an OpenAI-compatible HTTP API
///
/// # Examples
///
/// ```no_run
/// use rashomon_model::{ModelConfig, OpenAiClient};
///
/// let client = OpenAiClient::new("sk-example", ModelConfig::default()).unwrap();
/// ```
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    chat_model: String,
    embedding_model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: String) -> Self {
        Self {
            role: "system".to_string(),
            content,
        }
    }

    fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Request body for the chat completions endpoint
#[derive(Serialize)]
struct ChatRequestBody {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Request body for the embeddings endpoint
#[derive(Serialize)]
struct EmbeddingRequestBody {
    model: String,
    input: String,
}

#[derive(Deserialize)]
struct EmbeddingResponseBody {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiClient {
    /// Create a client with the given API key and settings
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Credential` for an empty key, and
    /// `ModelError::Transport` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, config: ModelConfig) -> Result<Self, ModelError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ModelError::Credential("empty API key".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url,
            api_key,
            chat_model: config.chat_model,
            embedding_model: config.embedding_model,
            client,
            max_retries: config.max_retries,
        })
    }

    /// The chat model this client speaks to
    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    /// The embedding model this client speaks to
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// POST a JSON body and decode a JSON response, retrying transient
    /// failures with exponential backoff.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ModelError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.try_post(&url, body).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !error.is_retryable() {
                        return Err(error);
                    }
                    debug!("retryable failure calling {}: {}", url, error);
                    last_error = Some(error);
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        let error = last_error
            .unwrap_or_else(|| ModelError::Transport("max retries exceeded".to_string()));
        warn!("model call to {} failed after {} attempts: {}", url, attempts, error);
        Err(error)
    }

    async fn try_post<B, T>(&self, url: &str, body: &B) -> Result<T, ModelError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ModelError::Parse(format!("failed to decode response: {}", e)))
    }
}

#[async_trait]
impl CompletionModel for OpenAiClient {
    type Error = ModelError;

    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let body = ChatRequestBody {
            model: self.chat_model.clone(),
            messages: vec![
                ChatMessage::system(request.system),
                ChatMessage::user(request.user),
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: request.json_response.then(ResponseFormat::json_object),
        };

        let response: ChatResponseBody = self.post_json("/chat/completions", &body).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::Parse("response carried no choices".to_string()))
    }
}

#[async_trait]
impl EmbeddingModel for OpenAiClient {
    type Error = ModelError;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let body = EmbeddingRequestBody {
            model: self.embedding_model.clone(),
            input: text.to_string(),
        };

        let response: EmbeddingResponseBody = self.post_json("/embeddings", &body).await?;

        response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| ModelError::Parse("response carried no embedding".to_string()))
    }
}
