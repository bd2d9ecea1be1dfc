//! Score cache for rerun memoization

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct CacheRow {
    key: String,
    score: f64,
}

/// Content-keyed agreement scores persisted across reruns
///
/// Keys are pair content hashes, so a rerun over unchanged narrative
/// and article text skips the model call entirely. The cache is an
/// optimization: a missing cache file is an empty cache, never an
/// error.
#[derive(Debug, Default)]
pub struct ScoreCache {
    entries: BTreeMap<String, f64>,
}

impl ScoreCache {
    /// An empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cache file, treating an absent file as empty
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut entries = BTreeMap::new();
        for row in reader.deserialize::<CacheRow>() {
            let row = row?;
            entries.insert(row.key, row.score);
        }

        info!(entries = entries.len(), path = %path.display(), "loaded score cache");
        Ok(Self { entries })
    }

    /// Look up a cached score by pair key
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Record a score under a pair key
    pub fn insert(&mut self, key: String, score: f64) {
        self.entries.insert(key, score);
    }

    /// Number of cached pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no pairs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the cache, sorted by key for stable files
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(path)?;
        for (key, score) in &self.entries {
            writer.serialize(CacheRow {
                key: key.clone(),
                score: *score,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}
