//! Embedding module - a unit's vector representation

/// One unit's position in the run paired with its embedding vector.
///
/// `unit_index` refers to the position of the embedded text in the run's
/// input order (the per-unit list in units mode, the per-article list in
/// summary mode). An empty vector is the sentinel for a failed embedding
/// call; consumers must check [`is_usable`](Embedding::is_usable) and
/// exclude sentinels from clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    /// Position of the embedded text in the run's input order
    pub unit_index: usize,

    /// The vector, empty when the embedding call degraded
    pub vector: Vec<f32>,
}

impl Embedding {
    /// Pair a position with its vector
    pub fn new(unit_index: usize, vector: Vec<f32>) -> Self {
        Self { unit_index, vector }
    }

    /// The sentinel recorded when an embedding call failed
    pub fn sentinel(unit_index: usize) -> Self {
        Self {
            unit_index,
            vector: Vec::new(),
        }
    }

    /// Whether this embedding carries a usable vector
    pub fn is_usable(&self) -> bool {
        !self.vector.is_empty()
    }

    /// Vector length, zero for sentinels
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}
