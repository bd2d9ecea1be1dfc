//! Agreement mapping output

use crate::error::StoreError;
use rashomon_domain::AgreementScore;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct MappingRow {
    narrative_id: usize,
    article_id: usize,
    agreement_score: f64,
}

/// Write the full narrative/article agreement matrix
///
/// One row per scored pair, in the order given. Downstream consumers
/// join `article_id` back against the corpus file's row ids.
pub fn save_mapping(path: &Path, scores: &[AgreementScore]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;

    for score in scores {
        writer.serialize(MappingRow {
            narrative_id: score.narrative_id,
            article_id: score.article_id,
            agreement_score: score.score,
        })?;
    }

    writer.flush()?;
    info!(count = scores.len(), path = %path.display(), "saved agreement mapping");
    Ok(())
}
