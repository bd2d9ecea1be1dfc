//! Silhouette scoring over a precomputed distance matrix
//!
//! The matrix is built once per sweep and shared across every candidate
//! cluster count, so each candidate costs one k-means fit plus an O(n^2)
//! scoring pass.

use std::collections::HashMap;

/// Pairwise Euclidean distances between vectors
pub(crate) fn distance_matrix(vectors: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let dist = euclidean(&vectors[i], &vectors[j]);
            matrix[i][j] = dist;
            matrix[j][i] = dist;
        }
    }

    matrix
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Silhouette coefficient for a single point.
///
/// s(i) = (b(i) - a(i)) / max(a(i), b(i))
///
/// where a(i) is the mean distance to the other points in the same
/// cluster and b(i) is the smallest mean distance to any other cluster.
fn point_coefficient(point: usize, assignments: &[usize], matrix: &[Vec<f64>]) -> f64 {
    let cluster = assignments[point];
    let n = assignments.len();

    let mut same_cluster_dists: Vec<f64> = Vec::new();
    let mut other_cluster_dists: HashMap<usize, Vec<f64>> = HashMap::new();

    for i in 0..n {
        if i == point {
            continue;
        }

        let dist = matrix[point][i];
        if assignments[i] == cluster {
            same_cluster_dists.push(dist);
        } else {
            other_cluster_dists
                .entry(assignments[i])
                .or_default()
                .push(dist);
        }
    }

    let a = if same_cluster_dists.is_empty() {
        0.0
    } else {
        same_cluster_dists.iter().sum::<f64>() / same_cluster_dists.len() as f64
    };

    let b = other_cluster_dists
        .values()
        .map(|dists| dists.iter().sum::<f64>() / dists.len() as f64)
        .min_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    let max_ab = a.max(b);
    if max_ab < f64::EPSILON {
        0.0
    } else {
        (b - a) / max_ab
    }
}

/// Mean silhouette over all points.
///
/// Callers must ensure every cluster has at least two members; the
/// score is undefined otherwise.
pub(crate) fn mean_silhouette(assignments: &[usize], matrix: &[Vec<f64>]) -> f64 {
    if assignments.is_empty() {
        return 0.0;
    }

    let n = assignments.len();
    let sum: f64 = (0..n)
        .map(|i| point_coefficient(i, assignments, matrix))
        .sum();

    sum / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_matrix_symmetric() {
        let vectors = vec![vec![0.0, 0.0], vec![3.0, 4.0], vec![6.0, 8.0]];
        let matrix = distance_matrix(&vectors);

        assert_eq!(matrix[0][0], 0.0);
        assert!((matrix[0][1] - 5.0).abs() < 1e-12);
        assert!((matrix[1][0] - 5.0).abs() < 1e-12);
        assert!((matrix[0][2] - 10.0).abs() < 1e-12);
        assert!((matrix[1][2] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_well_separated_clusters_score_high() {
        let assignments = vec![0, 0, 1, 1];
        let matrix = vec![
            vec![0.0, 0.1, 0.9, 0.8],
            vec![0.1, 0.0, 0.8, 0.9],
            vec![0.9, 0.8, 0.0, 0.1],
            vec![0.8, 0.9, 0.1, 0.0],
        ];

        let score = mean_silhouette(&assignments, &matrix);
        assert!(score > 0.5, "score was {}", score);
    }

    #[test]
    fn test_single_point_scores_zero() {
        let assignments = vec![0];
        let matrix = vec![vec![0.0]];
        assert_eq!(mean_silhouette(&assignments, &matrix), 0.0);
    }

    #[test]
    fn test_empty_assignment_scores_zero() {
        assert_eq!(mean_silhouette(&[], &[]), 0.0);
    }

    #[test]
    fn test_mixed_clusters_score_low() {
        // Interleaved assignment over the same well-separated points
        let assignments = vec![0, 1, 0, 1];
        let matrix = vec![
            vec![0.0, 0.1, 0.9, 0.8],
            vec![0.1, 0.0, 0.8, 0.9],
            vec![0.9, 0.8, 0.0, 0.1],
            vec![0.8, 0.9, 0.1, 0.0],
        ];

        let mixed = mean_silhouette(&assignments, &matrix);
        let separated = mean_silhouette(&[0, 0, 1, 1], &matrix);
        assert!(mixed < separated);
        assert!(mixed < 0.0, "interleaving should score negative, got {}", mixed);
    }
}
