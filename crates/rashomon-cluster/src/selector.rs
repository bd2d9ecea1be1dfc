//! Cluster-count sweep over seeded k-means fits

use crate::error::ClusterError;
use crate::selection::Selection;
use crate::silhouette;
use linfa::prelude::*;
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

type UnitDataset = DatasetBase<Array2<f64>, Array1<()>>;

/// Sweeps candidate cluster counts and keeps the best-scoring partition
///
/// The same seed is reused for every candidate fit, so repeated sweeps
/// over the same vectors produce identical assignments.
#[derive(Debug, Clone)]
pub struct ClusterSelector {
    min_clusters: usize,
    max_clusters: usize,
    seed: u64,
}

impl ClusterSelector {
    /// Create a selector with inclusive cluster-count bounds and a fixed seed
    pub fn new(min_clusters: usize, max_clusters: usize, seed: u64) -> Self {
        Self {
            min_clusters: min_clusters.max(1),
            max_clusters: max_clusters.max(min_clusters),
            seed,
        }
    }

    /// Choose a cluster count and assignment for the given vectors
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidInput`] when vectors disagree on
    /// dimension or have no components, and [`ClusterError::Fit`] when
    /// even the fallback fit fails. Too few vectors is not an error.
    pub fn select(&self, vectors: &[Vec<f64>]) -> Result<Selection, ClusterError> {
        let n = vectors.len();

        if n < self.min_clusters {
            info!(
                vectors = n,
                min_clusters = self.min_clusters,
                "too few vectors to sweep, assigning a single cluster"
            );
            return Ok(Selection::Degenerate {
                assignments: vec![0; n],
            });
        }

        let dimension = vectors[0].len();
        if dimension == 0 {
            return Err(ClusterError::InvalidInput(
                "vectors have no components".to_string(),
            ));
        }
        if vectors.iter().any(|v| v.len() != dimension) {
            return Err(ClusterError::InvalidInput(
                "vectors disagree on dimension".to_string(),
            ));
        }

        let dataset = build_dataset(vectors, dimension)?;
        let matrix = silhouette::distance_matrix(vectors);

        let upper = self.max_clusters.min(n - 1);
        let mut best: Option<(usize, Vec<usize>, f64)> = None;

        for k in self.min_clusters..=upper {
            let assignments = match self.fit(&dataset, k) {
                Ok(assignments) => assignments,
                Err(message) => {
                    warn!(k, "k-means fit failed: {}", message);
                    continue;
                }
            };

            if smallest_cluster(&assignments, k) < 2 {
                debug!(k, "skipping candidate with a cluster under two members");
                continue;
            }

            let quality = silhouette::mean_silhouette(&assignments, &matrix);
            debug!(k, quality, "scored candidate");

            // Strict comparison keeps the first k on ties
            let improved = match &best {
                Some((_, _, best_quality)) => quality > *best_quality,
                None => true,
            };
            if improved {
                best = Some((k, assignments, quality));
            }
        }

        if let Some((k, assignments, quality)) = best {
            info!(k, quality, vectors = n, "selected cluster count");
            return Ok(Selection::Chosen {
                k,
                assignments,
                quality,
            });
        }

        // Nothing was scoreable, so the smallest allowed count is
        // accepted without a quality score.
        let k = self.min_clusters;
        let assignments = self.fit(&dataset, k).map_err(ClusterError::Fit)?;
        warn!(k, vectors = n, "no candidate was scoreable, falling back");
        Ok(Selection::Fallback { k, assignments })
    }

    fn fit(&self, dataset: &UnitDataset, k: usize) -> Result<Vec<usize>, String> {
        let rng = StdRng::seed_from_u64(self.seed);
        let model = KMeans::params_with_rng(k, rng)
            .n_runs(10)
            .max_n_iterations(300)
            .tolerance(1e-4)
            .fit(dataset)
            .map_err(|e| e.to_string())?;

        let predictions = model.predict(dataset);
        Ok(predictions.iter().cloned().collect())
    }
}

fn build_dataset(vectors: &[Vec<f64>], dimension: usize) -> Result<UnitDataset, ClusterError> {
    let mut data = Vec::with_capacity(vectors.len() * dimension);
    for vector in vectors {
        data.extend_from_slice(vector);
    }

    let records = Array2::from_shape_vec((vectors.len(), dimension), data)
        .map_err(|e| ClusterError::InvalidInput(format!("failed to shape matrix: {}", e)))?;

    Ok(DatasetBase::new(
        records,
        Array1::from_elem(vectors.len(), ()),
    ))
}

fn smallest_cluster(assignments: &[usize], k: usize) -> usize {
    let mut sizes = vec![0usize; k];
    for &cluster in assignments {
        if cluster < k {
            sizes[cluster] += 1;
        }
    }
    sizes.into_iter().min().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tight groups of points around the given centers.
    fn grouped_vectors(centers: &[(f64, f64)], sizes: &[usize]) -> Vec<Vec<f64>> {
        let mut vectors = Vec::new();
        for (group, (&(x, y), &size)) in centers.iter().zip(sizes.iter()).enumerate() {
            for i in 0..size {
                let dx = i as f64 * 0.01;
                let dy = (i + group) as f64 * 0.01;
                vectors.push(vec![x + dx, y + dy]);
            }
        }
        vectors
    }

    #[test]
    fn test_three_separated_groups_yield_three_clusters() {
        // 25 vectors in three tight, well-separated groups
        let vectors = grouped_vectors(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)], &[9, 8, 8]);
        assert_eq!(vectors.len(), 25);

        let selector = ClusterSelector::new(2, 10, 42);
        let selection = selector.select(&vectors).unwrap();

        assert_eq!(selection.k(), 3);
        assert_eq!(selection.assignments().len(), 25);
        let quality = selection.quality().unwrap();
        assert!(quality > 0.5, "quality was {}", quality);
    }

    #[test]
    fn test_chosen_partition_covers_all_vectors() {
        let vectors = grouped_vectors(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)], &[9, 8, 8]);
        let selector = ClusterSelector::new(2, 10, 42);
        let selection = selector.select(&vectors).unwrap();

        let k = selection.k();
        let mut sizes = vec![0usize; k];
        for &cluster in selection.assignments() {
            assert!(cluster < k);
            sizes[cluster] += 1;
        }
        assert_eq!(sizes.iter().sum::<usize>(), vectors.len());
        assert!(sizes.iter().all(|&size| size >= 2));
    }

    #[test]
    fn test_single_vector_degenerates() {
        let vectors = vec![vec![1.0, 2.0, 3.0]];
        let selector = ClusterSelector::new(2, 10, 42);
        let selection = selector.select(&vectors).unwrap();

        assert!(selection.is_degenerate());
        assert_eq!(selection.k(), 1);
        assert_eq!(selection.assignments(), &[0]);
        assert_eq!(selection.quality(), None);
    }

    #[test]
    fn test_empty_input_degenerates() {
        let selector = ClusterSelector::new(2, 10, 42);
        let selection = selector.select(&[]).unwrap();

        assert!(selection.is_degenerate());
        assert!(selection.assignments().is_empty());
    }

    #[test]
    fn test_exactly_min_vectors_falls_back() {
        // Two vectors leave no candidate range, so min_clusters is
        // accepted without a score.
        let vectors = vec![vec![0.0, 0.0], vec![10.0, 10.0]];
        let selector = ClusterSelector::new(2, 10, 42);
        let selection = selector.select(&vectors).unwrap();

        assert!(matches!(selection, Selection::Fallback { k: 2, .. }));
        assert_eq!(selection.assignments().len(), 2);
        assert_eq!(selection.quality(), None);
    }

    #[test]
    fn test_unscoreable_candidates_fall_back() {
        // Three vectors admit only k = 2, which always leaves one
        // singleton cluster here, so the sweep finds nothing scoreable.
        let vectors = vec![vec![0.0, 0.0], vec![0.1, 0.0], vec![10.0, 10.0]];
        let selector = ClusterSelector::new(2, 10, 42);
        let selection = selector.select(&vectors).unwrap();

        assert!(matches!(selection, Selection::Fallback { k: 2, .. }));
        assert_eq!(selection.assignments().len(), 3);
    }

    #[test]
    fn test_mismatched_dimensions_rejected() {
        let vectors = vec![vec![0.0, 1.0], vec![0.0]];
        let selector = ClusterSelector::new(2, 10, 42);
        let result = selector.select(&vectors);
        assert!(matches!(result, Err(ClusterError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let vectors = vec![vec![], vec![]];
        let selector = ClusterSelector::new(2, 10, 42);
        let result = selector.select(&vectors);
        assert!(matches!(result, Err(ClusterError::InvalidInput(_))));
    }

    #[test]
    fn test_same_seed_reproduces_assignments() {
        let vectors = grouped_vectors(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)], &[9, 8, 8]);
        let selector = ClusterSelector::new(2, 10, 42);

        let first = selector.select(&vectors).unwrap();
        let second = selector.select(&vectors).unwrap();

        assert_eq!(first.k(), second.k());
        assert_eq!(first.assignments(), second.assignments());
    }

    #[test]
    fn test_group_members_share_a_cluster() {
        let vectors = grouped_vectors(&[(0.0, 0.0), (10.0, 10.0)], &[6, 6]);
        let selector = ClusterSelector::new(2, 5, 42);
        let selection = selector.select(&vectors).unwrap();

        assert_eq!(selection.k(), 2);
        let assignments = selection.assignments();
        // Every vector in a tight group lands with its group
        assert!(assignments[..6].iter().all(|&c| c == assignments[0]));
        assert!(assignments[6..].iter().all(|&c| c == assignments[6]));
        assert_ne!(assignments[0], assignments[6]);
    }
}
