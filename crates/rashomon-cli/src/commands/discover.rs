//! Discover command implementation.

use crate::cli::DiscoverArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use rashomon_model::OpenAiClient;
use rashomon_pipeline::{DiscoveryStage, PipelineConfig};
use rashomon_store::{load_articles, save_narratives};
use std::sync::Arc;

/// Execute the discover command.
///
/// Loads the corpus, runs the discovery stage, and writes the narratives
/// checkpoint that the score command later reads.
pub async fn execute_discover(
    args: DiscoverArgs,
    client: Option<Arc<OpenAiClient>>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let pipeline = apply_overrides(&args, config.pipeline.clone());

    let limit = args.limit.unwrap_or(pipeline.limits.discover_articles);
    let articles = load_articles(&args.articles, limit)?;

    let stage = DiscoveryStage::new(client.clone(), client, pipeline);
    let outcome = stage.run(&articles, args.mode.into()).await?;

    save_narratives(&args.output, &outcome.narratives)?;
    println!("{}", formatter.discovery_report(&outcome, &args.output)?);

    Ok(())
}

/// Apply command-line cluster overrides onto the configured settings.
fn apply_overrides(args: &DiscoverArgs, mut pipeline: PipelineConfig) -> PipelineConfig {
    if let Some(min) = args.min_clusters {
        pipeline.cluster.min_clusters = min;
    }
    if let Some(max) = args.max_clusters {
        pipeline.cluster.max_clusters = max;
    }
    if let Some(seed) = args.seed {
        pipeline.cluster.seed = seed;
    }
    pipeline
}
