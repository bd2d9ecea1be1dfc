//! Run command implementation.
//!
//! Chains discovery and scoring in one invocation. Scoring reads the
//! checkpoint back from disk rather than using the in-memory narratives,
//! so a combined run exercises the same path as two separate commands.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use rashomon_model::OpenAiClient;
use rashomon_pipeline::{DiscoveryStage, ScoringStage};
use rashomon_store::{load_articles, load_narratives, save_mapping, save_narratives, ScoreCache};
use std::sync::Arc;

/// Execute the run command.
pub async fn execute_run(
    args: RunArgs,
    client: Option<Arc<OpenAiClient>>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let pipeline = config.pipeline.clone();

    let discover_articles = load_articles(&args.articles, pipeline.limits.discover_articles)?;
    let discovery = DiscoveryStage::new(client.clone(), client.clone(), pipeline.clone());
    let discovered = discovery.run(&discover_articles, args.mode.into()).await?;

    save_narratives(&args.narratives, &discovered.narratives)?;
    println!("{}", formatter.discovery_report(&discovered, &args.narratives)?);

    let narratives = load_narratives(&args.narratives)?;
    let score_articles = load_articles(&args.articles, pipeline.limits.score_articles)?;

    let mut cache = ScoreCache::load(&args.cache)?;
    let scoring = ScoringStage::new(client, pipeline);
    let scored = scoring
        .run(&narratives, &score_articles, &mut cache, !args.no_cache)
        .await?;

    cache.save(&args.cache)?;
    save_mapping(&args.output, &scored.scores)?;
    println!("{}", formatter.scoring_report(&scored, &args.output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ModeArg;
    use crate::config::OutputFormat;
    use std::fs;
    use tempfile::tempdir;

    const CORPUS: &str = "\
Title,Full Text of Article,Media Location,Published Date
Grid failure,The grid failed across three counties on Monday and the operator promised a full investigation into the collapse.,City A,2020-02-10
";

    #[tokio::test]
    async fn test_keyless_run_writes_both_artifacts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("corpus.csv"), CORPUS).unwrap();

        let args = RunArgs {
            articles: dir.path().join("corpus.csv"),
            narratives: dir.path().join("narratives.csv"),
            output: dir.path().join("mapping.csv"),
            mode: ModeArg::Units,
            cache: dir.path().join("cache.csv"),
            no_cache: false,
        };
        let narratives_path = args.narratives.clone();
        let mapping_path = args.output.clone();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_run(args, None, &Config::default(), &formatter)
            .await
            .unwrap();

        assert!(narratives_path.exists());
        assert!(mapping_path.exists());
    }
}
