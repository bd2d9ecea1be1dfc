//! Outcome of a cluster-count sweep

/// The result of sweeping candidate cluster counts over one vector set
///
/// Every variant carries a full assignment: one cluster id per input
/// vector, in input order.
#[derive(Debug, Clone)]
pub enum Selection {
    /// A candidate count won on silhouette score
    Chosen {
        /// The winning cluster count
        k: usize,
        /// Cluster id per input vector
        assignments: Vec<usize>,
        /// Mean silhouette of the winning partition
        quality: f64,
    },

    /// No candidate was scoreable, so the minimum count was accepted as-is
    Fallback {
        /// The minimum cluster count
        k: usize,
        /// Cluster id per input vector
        assignments: Vec<usize>,
    },

    /// Fewer vectors than the minimum count; everything shares cluster 0
    Degenerate {
        /// Zero for every input vector
        assignments: Vec<usize>,
    },
}

impl Selection {
    /// The chosen cluster count (1 for the degenerate case)
    pub fn k(&self) -> usize {
        match self {
            Selection::Chosen { k, .. } | Selection::Fallback { k, .. } => *k,
            Selection::Degenerate { .. } => 1,
        }
    }

    /// Cluster id per input vector, in input order
    pub fn assignments(&self) -> &[usize] {
        match self {
            Selection::Chosen { assignments, .. }
            | Selection::Fallback { assignments, .. }
            | Selection::Degenerate { assignments } => assignments,
        }
    }

    /// The silhouette score of the winning partition, when one was computed
    pub fn quality(&self) -> Option<f64> {
        match self {
            Selection::Chosen { quality, .. } => Some(*quality),
            Selection::Fallback { .. } | Selection::Degenerate { .. } => None,
        }
    }

    /// Whether selection was skipped for lack of vectors
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Selection::Degenerate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chosen_accessors() {
        let selection = Selection::Chosen {
            k: 3,
            assignments: vec![0, 1, 2, 0],
            quality: 0.8,
        };
        assert_eq!(selection.k(), 3);
        assert_eq!(selection.assignments(), &[0, 1, 2, 0]);
        assert_eq!(selection.quality(), Some(0.8));
        assert!(!selection.is_degenerate());
    }

    #[test]
    fn test_fallback_has_no_quality() {
        let selection = Selection::Fallback {
            k: 2,
            assignments: vec![0, 1],
        };
        assert_eq!(selection.k(), 2);
        assert_eq!(selection.quality(), None);
        assert!(!selection.is_degenerate());
    }

    #[test]
    fn test_degenerate_is_single_cluster() {
        let selection = Selection::Degenerate {
            assignments: vec![0],
        };
        assert_eq!(selection.k(), 1);
        assert_eq!(selection.assignments(), &[0]);
        assert_eq!(selection.quality(), None);
        assert!(selection.is_degenerate());
    }
}
