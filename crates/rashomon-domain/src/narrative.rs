//! Narrative module - the synthesized description of one cluster

use serde::Serialize;

/// A synthesized description of the common theme in one cluster.
///
/// One narrative per cluster, created once per clustering run and immutable
/// after synthesis. The id is the id of the source cluster. Only id and
/// description survive in the narratives file; sample units and the unit
/// count are run-local context kept for review output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    /// Narrative id (= source cluster id)
    pub id: usize,

    /// Model-produced description, trimmed
    pub description: String,

    /// Up to a handful of member unit texts, in cluster order
    pub sample_units: Vec<String>,

    /// How many units the source cluster held
    pub unit_count: usize,
}

impl Narrative {
    /// Create a narrative with its run-local context
    pub fn new(
        id: usize,
        description: impl Into<String>,
        sample_units: Vec<String>,
        unit_count: usize,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            sample_units,
            unit_count,
        }
    }

    /// Create a narrative carrying only id and description.
    ///
    /// This is the shape that comes back from a narratives file, where
    /// sample units and counts are not persisted.
    pub fn bare(id: usize, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            sample_units: Vec::new(),
            unit_count: 0,
        }
    }
}
