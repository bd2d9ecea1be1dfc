//! Command implementations.

use crate::error::Result;
use rashomon_model::OpenAiClient;
use rashomon_pipeline::PipelineConfig;
use std::sync::Arc;
use tracing::warn;

pub mod discover;
pub mod run;
pub mod score;

pub use self::discover::execute_discover;
pub use self::run::execute_run;
pub use self::score::execute_score;

/// Build the model client from an API key, or none when no key is present.
///
/// A missing key is not fatal. Stages run without a model handle and
/// degrade per call, so a keyless run still produces its output files.
pub fn build_client(
    api_key: Option<String>,
    config: &PipelineConfig,
) -> Result<Option<Arc<OpenAiClient>>> {
    let key = api_key.unwrap_or_default();
    if key.trim().is_empty() {
        warn!("no API key configured; model calls will be skipped");
        return Ok(None);
    }

    let client = OpenAiClient::new(key, config.model.client_config())?;
    Ok(Some(Arc::new(client)))
}
