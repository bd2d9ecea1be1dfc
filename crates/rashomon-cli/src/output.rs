//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use rashomon_pipeline::{DiscoveryOutcome, ScoringOutcome};
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const DESCRIPTION_CELL_CHARS: usize = 72;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Compose the full report for a discovery run.
    pub fn discovery_report(&self, outcome: &DiscoveryOutcome, output: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.discovery_json(outcome),
            OutputFormat::Quiet => Ok(outcome.narratives.len().to_string()),
            OutputFormat::Table => {
                let mut sections = vec![self.discovery_table(outcome)];
                sections.push(self.success(&format!(
                    "Wrote {} narrative(s) to {}",
                    outcome.narratives.len(),
                    output.display()
                )));
                if let Some(quality) = outcome.quality {
                    sections.push(self.info(&format!(
                        "Clustering quality (mean silhouette): {:.3}",
                        quality
                    )));
                }
                sections.push(outcome.metrics.summary());
                if outcome.metrics.has_degradation() {
                    sections.push(self.warning(
                        "Some model calls degraded; results include placeholders.",
                    ));
                }
                Ok(sections.join("\n"))
            }
        }
    }

    /// Compose the full report for a scoring run.
    pub fn scoring_report(&self, outcome: &ScoringOutcome, output: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.scoring_json(outcome),
            OutputFormat::Quiet => Ok(outcome.scores.len().to_string()),
            OutputFormat::Table => {
                let mut sections = vec![self.scoring_table(outcome)];
                sections.push(self.success(&format!(
                    "Wrote {} score(s) to {}",
                    outcome.scores.len(),
                    output.display()
                )));
                sections.push(outcome.metrics.summary());
                if outcome.metrics.has_degradation() {
                    sections.push(self.warning(
                        "Some pairs fell back to the neutral score; they were not cached.",
                    ));
                }
                Ok(sections.join("\n"))
            }
        }
    }

    fn discovery_json(&self, outcome: &DiscoveryOutcome) -> Result<String> {
        let narratives: Vec<serde_json::Value> = outcome
            .narratives
            .iter()
            .map(|n| {
                serde_json::json!({
                    "id": n.id,
                    "description": n.description,
                    "unit_count": n.unit_count,
                    "sample_units": n.sample_units,
                })
            })
            .collect();

        let value = serde_json::json!({
            "run_id": outcome.run_id.to_string(),
            "quality": outcome.quality,
            "narratives": narratives,
            "metrics": {
                "articles_loaded": outcome.metrics.articles_loaded,
                "units_segmented": outcome.metrics.units_segmented,
                "embeddings_degraded": outcome.metrics.embeddings_degraded,
                "narratives_placeholder": outcome.metrics.narratives_placeholder,
            },
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Format narratives as a table, one row per narrative.
    fn discovery_table(&self, outcome: &DiscoveryOutcome) -> String {
        if outcome.narratives.is_empty() {
            return self.colorize("No narratives discovered.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Units", "Description"]);

        for narrative in &outcome.narratives {
            let id = narrative.id.to_string();
            let units = narrative.unit_count.to_string();
            builder.push_record([
                id.as_str(),
                units.as_str(),
                &truncate(&narrative.description, DESCRIPTION_CELL_CHARS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn scoring_json(&self, outcome: &ScoringOutcome) -> Result<String> {
        let scores: Vec<serde_json::Value> = outcome
            .scores
            .iter()
            .map(|s| {
                serde_json::json!({
                    "narrative_id": s.narrative_id,
                    "article_id": s.article_id,
                    "score": s.score,
                })
            })
            .collect();

        let value = serde_json::json!({
            "run_id": outcome.run_id.to_string(),
            "scores": scores,
            "metrics": {
                "pairs_scored": outcome.metrics.pairs_scored,
                "pairs_defaulted": outcome.metrics.pairs_defaulted,
                "cache_hits": outcome.metrics.cache_hits,
            },
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Format scores as an agreement matrix, one row per narrative.
    fn scoring_table(&self, outcome: &ScoringOutcome) -> String {
        if outcome.scores.is_empty() {
            return self.colorize("No pairs scored.", "yellow");
        }

        // Scores are narrative-major, so one chunk per narrative
        let articles = outcome.metrics.articles_loaded;
        let mut builder = Builder::default();

        let mut header = vec!["Narrative".to_string()];
        header.extend(
            outcome.scores[..articles]
                .iter()
                .map(|s| format!("Article {}", s.article_id)),
        );
        builder.push_record(header);

        for row in outcome.scores.chunks(articles) {
            let mut record = vec![row[0].narrative_id.to_string()];
            record.extend(row.iter().map(|s| format!("{:.2}", s.score)));
            builder.push_record(record);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Truncate text to a character budget for table cells.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}
