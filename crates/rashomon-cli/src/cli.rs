//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use rashomon_pipeline::DiscoveryMode;
use rashomon_store::{DEFAULT_CACHE_FILE, DEFAULT_MAPPING_FILE, DEFAULT_NARRATIVES_FILE};
use std::path::PathBuf;

/// Rashomon CLI - discover competing narratives in a news corpus and score
/// how strongly each article agrees with each narrative.
#[derive(Debug, Parser)]
#[command(name = "rashomon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// API key for the model endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (counts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover narratives in an article corpus
    Discover(DiscoverArgs),

    /// Score articles against a saved narratives checkpoint
    Score(ScoreArgs),

    /// Discover narratives, then score the corpus against them
    Run(RunArgs),
}

/// Arguments for the discover command.
#[derive(Debug, Parser)]
pub struct DiscoverArgs {
    /// CSV corpus of articles
    #[arg(short, long)]
    pub articles: PathBuf,

    /// Where to write the narratives checkpoint
    #[arg(short, long, default_value = DEFAULT_NARRATIVES_FILE)]
    pub output: PathBuf,

    /// Cap on articles read from the corpus, 0 for no cap
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Discovery mode
    #[arg(short, long, value_enum, default_value = "units")]
    pub mode: ModeArg,

    /// Lower bound on candidate cluster counts
    #[arg(long)]
    pub min_clusters: Option<usize>,

    /// Upper bound on candidate cluster counts
    #[arg(long)]
    pub max_clusters: Option<usize>,

    /// Seed for cluster initialization
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    /// CSV corpus of articles
    #[arg(short, long)]
    pub articles: PathBuf,

    /// Narratives checkpoint to score against
    #[arg(short, long, default_value = DEFAULT_NARRATIVES_FILE)]
    pub narratives: PathBuf,

    /// Where to write the narrative-article mapping
    #[arg(short, long, default_value = DEFAULT_MAPPING_FILE)]
    pub output: PathBuf,

    /// Cap on articles read from the corpus, 0 for no cap
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Score cache location
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache: PathBuf,

    /// Ignore cached scores; fresh scores are still written back
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// CSV corpus of articles
    #[arg(short, long)]
    pub articles: PathBuf,

    /// Where to write the narratives checkpoint
    #[arg(long, default_value = DEFAULT_NARRATIVES_FILE)]
    pub narratives: PathBuf,

    /// Where to write the narrative-article mapping
    #[arg(short, long, default_value = DEFAULT_MAPPING_FILE)]
    pub output: PathBuf,

    /// Discovery mode
    #[arg(short, long, value_enum, default_value = "units")]
    pub mode: ModeArg,

    /// Score cache location
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache: PathBuf,

    /// Ignore cached scores; fresh scores are still written back
    #[arg(long)]
    pub no_cache: bool,
}

/// Discovery mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Cluster individual article units
    Units,
    /// Cluster six-dimension article summaries
    Summary,
}

impl From<ModeArg> for DiscoveryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Units => DiscoveryMode::Units,
            ModeArg::Summary => DiscoveryMode::Summary,
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
