//! Cluster module - a group of semantically similar units

use std::collections::BTreeMap;

/// One cluster from a clustering run.
///
/// Clusters partition the run's unit set: every unit index appears in
/// exactly one cluster, none in zero or two. Ids are small integers local
/// to the run that produced them; a rerun may hand the same id to
/// different content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Cluster id, also the id of the narrative synthesized from it
    pub id: usize,

    /// Indices into the run's unit list, in insertion order
    pub members: Vec<usize>,
}

impl Cluster {
    /// Create a cluster from an id and its member indices
    pub fn new(id: usize, members: Vec<usize>) -> Self {
        Self { id, members }
    }

    /// Number of member units
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the cluster has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Group a flat assignment (index position -> cluster id) into clusters.
///
/// Output is ordered by cluster id; each member list preserves the input
/// order of its indices, so "first few members" stays meaningful for
/// sample output.
///
/// # Examples
///
/// ```
/// use rashomon_domain::group_assignments;
///
/// let clusters = group_assignments(&[1, 0, 1, 0, 1]);
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].id, 0);
/// assert_eq!(clusters[0].members, vec![1, 3]);
/// assert_eq!(clusters[1].members, vec![0, 2, 4]);
/// ```
pub fn group_assignments(assignments: &[usize]) -> Vec<Cluster> {
    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, &cluster_id) in assignments.iter().enumerate() {
        members.entry(cluster_id).or_default().push(index);
    }
    members
        .into_iter()
        .map(|(id, members)| Cluster::new(id, members))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_partitions_all_indices() {
        let assignments = [0, 2, 1, 0, 2, 2];
        let clusters = group_assignments(&assignments);

        let mut seen: Vec<usize> = clusters.iter().flat_map(|c| c.members.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_grouping_orders_by_id() {
        let clusters = group_assignments(&[3, 1, 3, 1]);
        let ids: Vec<usize> = clusters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_empty_assignment() {
        assert!(group_assignments(&[]).is_empty());
    }

    #[test]
    fn test_single_cluster() {
        let clusters = group_assignments(&[0, 0, 0]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
        assert!(!clusters[0].is_empty());
    }
}
