//! Score command implementation.

use crate::cli::ScoreArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use rashomon_model::OpenAiClient;
use rashomon_pipeline::ScoringStage;
use rashomon_store::{load_articles, load_narratives, save_mapping, ScoreCache};
use std::sync::Arc;

/// Execute the score command.
///
/// Reads the narratives checkpoint and the corpus, scores every
/// narrative-article pair, and writes the agreement mapping. Cached
/// scores are reused unless `--no-cache` is given.
pub async fn execute_score(
    args: ScoreArgs,
    client: Option<Arc<OpenAiClient>>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let pipeline = config.pipeline.clone();

    let narratives = load_narratives(&args.narratives)?;
    let limit = args.limit.unwrap_or(pipeline.limits.score_articles);
    let articles = load_articles(&args.articles, limit)?;

    let mut cache = ScoreCache::load(&args.cache)?;
    let stage = ScoringStage::new(client, pipeline);
    let outcome = stage
        .run(&narratives, &articles, &mut cache, !args.no_cache)
        .await?;

    cache.save(&args.cache)?;
    save_mapping(&args.output, &outcome.scores)?;
    println!("{}", formatter.scoring_report(&outcome, &args.output)?);

    Ok(())
}
