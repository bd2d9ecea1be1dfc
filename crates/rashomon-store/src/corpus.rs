//! Article corpus loading

use crate::error::StoreError;
use rashomon_domain::Article;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// One row of the externally produced corpus file
///
/// Columns beyond these are ignored; missing columns default to empty.
#[derive(Debug, Deserialize)]
struct CorpusRow {
    #[serde(rename = "Title", default)]
    title: String,

    #[serde(rename = "Full Text of Article", default)]
    full_text: String,

    #[serde(rename = "Media Location", default)]
    media_location: Option<String>,

    #[serde(rename = "Published Date", default)]
    published_date: Option<String>,
}

/// Load articles from a corpus CSV file
///
/// Article ids are the zero-based row index, so skipped rows leave
/// gaps rather than renumbering later articles. A `limit` above zero
/// caps how many rows are read (before empty-text filtering); zero
/// means unlimited.
///
/// # Errors
///
/// Returns [`StoreError::InputMissing`] when the file does not exist.
/// Rows with empty article text are skipped with a warning, not an
/// error.
pub fn load_articles(path: &Path, limit: usize) -> Result<Vec<Article>, StoreError> {
    if !path.exists() {
        return Err(StoreError::input_missing(path));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut articles = Vec::new();

    for (index, row) in reader.deserialize::<CorpusRow>().enumerate() {
        if limit > 0 && index >= limit {
            break;
        }

        let row = row?;
        if row.full_text.trim().is_empty() {
            warn!(row = index, "skipping article with empty text");
            continue;
        }

        let title = if row.title.trim().is_empty() {
            format!("Article {}", index + 1)
        } else {
            row.title
        };

        let mut article = Article::new(index, title, row.full_text);
        article.source_location = row.media_location.filter(|s| !s.trim().is_empty());
        article.published_at = row.published_date.filter(|s| !s.trim().is_empty());
        articles.push(article);
    }

    info!(count = articles.len(), path = %path.display(), "loaded articles");
    Ok(articles)
}
