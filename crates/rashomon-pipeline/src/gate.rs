//! Credential gate around the model boundary
//!
//! A stage fans out many independent model calls. When the service
//! rejects the credentials, every remaining call is guaranteed to fail
//! the same way, so the gate trips once and short-circuits the rest of
//! the stage's calls locally. Callers see the same `ModelError` surface
//! either way and degrade per call as usual.

use async_trait::async_trait;
use rashomon_domain::traits::{CompletionModel, CompletionRequest, EmbeddingModel};
use rashomon_model::ModelError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Wraps a model handle and trips permanently on the first credential
/// rejection.
///
/// One tripped flag can be shared between the completion and embedding
/// gates of a stage: both call paths use the same credentials, so a
/// rejection on either side condemns both.
pub struct CredentialGate<M> {
    inner: Arc<M>,
    tripped: Arc<AtomicBool>,
}

impl<M> CredentialGate<M> {
    /// Gate a model handle with a shared tripped flag
    pub fn new(inner: Arc<M>, tripped: Arc<AtomicBool>) -> Self {
        Self { inner, tripped }
    }

    /// Whether a credential rejection has been seen
    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }

    fn skip_error(&self) -> ModelError {
        ModelError::Credential("skipped after earlier credential rejection".to_string())
    }

    fn record(&self, error: &ModelError) {
        // Log once per stage, on the call that trips the gate
        if error.is_auth_failure() && !self.tripped.swap(true, Ordering::Relaxed) {
            warn!("credential rejection, skipping remaining model calls this stage: {}", error);
        }
    }
}

impl<M> Clone for CredentialGate<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            tripped: Arc::clone(&self.tripped),
        }
    }
}

#[async_trait]
impl<M> CompletionModel for CredentialGate<M>
where
    M: CompletionModel<Error = ModelError>,
{
    type Error = ModelError;

    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        if self.is_tripped() {
            return Err(self.skip_error());
        }
        match self.inner.complete(request).await {
            Ok(text) => Ok(text),
            Err(error) => {
                self.record(&error);
                Err(error)
            }
        }
    }
}

#[async_trait]
impl<M> EmbeddingModel for CredentialGate<M>
where
    M: EmbeddingModel<Error = ModelError>,
{
    type Error = ModelError;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        if self.is_tripped() {
            return Err(self.skip_error());
        }
        match self.inner.embed(text).await {
            Ok(vector) => Ok(vector),
            Err(error) => {
                self.record(&error);
                Err(error)
            }
        }
    }
}
