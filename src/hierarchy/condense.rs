//! Cluster condensation (C4): dropping arena clusters whose membership
//! falls below `min_cluster_size`, preserving arena creation order.

use super::Cluster;

/// The subset of the arena whose members meet `min_cluster_size`, in arena
/// creation order (ascending `id`, so the root is first when it qualifies).
#[derive(Clone, Debug)]
pub(crate) struct CondensedForest {
    pub(crate) ids: Vec<usize>,
    set: std::collections::HashSet<usize>,
}

impl CondensedForest {
    pub(crate) fn contains(&self, id: usize) -> bool {
        self.set.contains(&id)
    }
}

/// Filters `arena` to clusters with at least `min_cluster_size` members.
pub(crate) fn condense(arena: &[Cluster], min_cluster_size: usize) -> CondensedForest {
    let ids: Vec<usize> = arena
        .iter()
        .filter(|c| c.members.len() >= min_cluster_size)
        .map(|c| c.id)
        .collect();
    let set = ids.iter().copied().collect();
    CondensedForest { ids, set }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mst::MstEdge;

    #[test]
    fn drops_clusters_below_threshold() {
        let edges = vec![
            MstEdge { source: 0, target: 1, weight: 1.0 },
            MstEdge { source: 1, target: 2, weight: 2.0 },
            MstEdge { source: 2, target: 3, weight: 3.0 },
        ];
        let arena = super::super::build(4, &edges, 2).expect("build must succeed");
        let condensed = condense(&arena, 2);
        for &id in &condensed.ids {
            assert!(arena[id].members.len() >= 2);
        }
    }

    #[test]
    fn preserves_ascending_creation_order() {
        let edges = vec![
            MstEdge { source: 0, target: 1, weight: 1.0 },
            MstEdge { source: 1, target: 2, weight: 2.0 },
        ];
        let arena = super::super::build(3, &edges, 1).expect("build must succeed");
        let condensed = condense(&arena, 1);
        let mut sorted = condensed.ids.clone();
        sorted.sort_unstable();
        assert_eq!(condensed.ids, sorted);
    }
}
