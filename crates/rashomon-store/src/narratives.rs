//! Narratives checkpoint between discovery and scoring

use crate::error::StoreError;
use rashomon_domain::Narrative;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct NarrativeRow {
    id: usize,
    narrative: String,
}

/// Write narratives to a checkpoint file
///
/// Internal newlines in each description are collapsed to `|` so the
/// value stays on one line for downstream tabular consumers.
pub fn save_narratives(path: &Path, narratives: &[Narrative]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;

    for narrative in narratives {
        writer.serialize(NarrativeRow {
            id: narrative.id,
            narrative: flatten_newlines(&narrative.description),
        })?;
    }

    writer.flush()?;
    info!(count = narratives.len(), path = %path.display(), "saved narratives");
    Ok(())
}

/// Read narratives back from a checkpoint file
///
/// Returns bare narratives: only id and description survive the
/// checkpoint, unit counts and samples do not.
///
/// # Errors
///
/// Returns [`StoreError::InputMissing`] when the file does not exist.
pub fn load_narratives(path: &Path) -> Result<Vec<Narrative>, StoreError> {
    if !path.exists() {
        return Err(StoreError::input_missing(path));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut narratives = Vec::new();

    for row in reader.deserialize::<NarrativeRow>() {
        let row = row?;
        narratives.push(Narrative::bare(row.id, row.narrative));
    }

    info!(count = narratives.len(), path = %path.display(), "loaded narratives");
    Ok(narratives)
}

/// Collapse runs of line breaks into a single `|`
fn flatten_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;

    for ch in text.chars() {
        if ch == '\n' || ch == '\r' {
            if !in_break {
                out.push('|');
                in_break = true;
            }
        } else {
            out.push(ch);
            in_break = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_preserves_ids_and_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("narratives.csv");

        let narratives = vec![
            Narrative::new(0, "First narrative.", vec!["a sample".to_string()], 4),
            Narrative::new(1, "Second narrative.", vec![], 2),
        ];
        save_narratives(&path, &narratives).unwrap();

        let loaded = load_narratives(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, 0);
        assert_eq!(loaded[0].description, "First narrative.");
        assert_eq!(loaded[1].id, 1);
        // Only id and description survive the checkpoint
        assert!(loaded[0].sample_units.is_empty());
        assert_eq!(loaded[0].unit_count, 0);
    }

    #[test]
    fn test_newlines_flattened_to_pipes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("narratives.csv");

        let narratives = vec![Narrative::new(
            0,
            "Actors blamed: none.\n\nLocation: offshore.\nIntent: accidental.",
            vec![],
            1,
        )];
        save_narratives(&path, &narratives).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Actors blamed: none.|Location: offshore.|Intent: accidental."));

        let loaded = load_narratives(&path).unwrap();
        assert!(!loaded[0].description.contains('\n'));
        assert!(loaded[0].description.contains('|'));
    }

    #[test]
    fn test_flatten_newlines_handles_crlf() {
        assert_eq!(flatten_newlines("a\r\n\r\nb"), "a|b");
        assert_eq!(flatten_newlines("a\nb\nc"), "a|b|c");
        assert_eq!(flatten_newlines("no breaks"), "no breaks");
    }

    #[test]
    fn test_missing_checkpoint_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let result = load_narratives(&path);
        assert!(matches!(result, Err(StoreError::InputMissing { .. })));
    }

    #[test]
    fn test_header_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("narratives.csv");
        save_narratives(&path, &[Narrative::new(0, "N.", vec![], 1)]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("id,narrative"));
    }
}
