//! Stability-based flat cluster extraction (C5).
//!
//! The selection walk pushes leaves, sums children, and reverts to the
//! parent if the parent's own stability wins. The parent wins outright
//! ties, so children are only kept on a strict parent loss.

use super::{condense::CondensedForest, Cluster};

/// Labels and soft-membership probabilities produced by extraction.
#[derive(Clone, Debug)]
pub(crate) struct ExtractionOutput {
    pub(crate) labels: Vec<i64>,
    pub(crate) probabilities: Vec<f32>,
}

/// Computes a cluster's excess-of-mass stability:
/// `|members(C)| * (1/leave_edge_weight - 1/birth_distance)`, where
/// `leave_edge_weight` is ε_min and `birth_distance` is ε_max.
///
/// A cluster with `leave_edge_weight == 0` is degenerate and contributes
/// zero stability rather than diverging.
fn formula_stability(cluster: &Cluster) -> f32 {
    if cluster.leave_edge_weight <= 0.0 || cluster.birth_distance <= 0.0 {
        return 0.0;
    }
    let size = cluster.members.len() as f32;
    size * ((1.0 / cluster.leave_edge_weight) - (1.0 / cluster.birth_distance))
}

fn effective_stability(cluster: &Cluster) -> f32 {
    cluster.forced_stability.unwrap_or_else(|| formula_stability(cluster))
}

/// The stability value used during selection, which for the root cluster
/// under `skip_root_cluster` is forced to 0 regardless of its formula or
/// forced value. Forcing rather than bypassing keeps a
/// childless root selectable through the ordinary leaf base case below, so
/// a dataset with no viable split still yields one cluster instead of
/// turning entirely to noise.
fn selection_stability(cluster: &Cluster, cluster_id: usize, skip_root_cluster: bool) -> f32 {
    if cluster_id == 0 && skip_root_cluster {
        0.0
    } else {
        effective_stability(cluster)
    }
}

fn condensed_children(cluster: &Cluster, condensed: &CondensedForest) -> Vec<usize> {
    [cluster.left_child, cluster.right_child]
        .into_iter()
        .flatten()
        .filter(|&id| condensed.contains(id))
        .collect()
}

/// Recursively walks the condensed forest rooted at `cluster_id`, pushing
/// selected cluster ids into `selected` in a stable, revertible order.
/// Returns the stability total attributed to the subtree rooted here (the
/// cluster's own stability if selected, the summed children's otherwise).
fn select_stable_clusters_inner(
    arena: &[Cluster],
    condensed: &CondensedForest,
    cluster_id: usize,
    skip_root_cluster: bool,
    selected: &mut Vec<usize>,
) -> f32 {
    let cluster = &arena[cluster_id];
    let children = condensed_children(cluster, condensed);

    if children.is_empty() {
        selected.push(cluster_id);
        return selection_stability(cluster, cluster_id, skip_root_cluster);
    }

    let mut child_total = 0.0f32;
    let mut spans = Vec::with_capacity(children.len());
    for child_id in children {
        let before = selected.len();
        child_total +=
            select_stable_clusters_inner(arena, condensed, child_id, skip_root_cluster, selected);
        spans.push((before, selected.len()));
    }

    let own = selection_stability(cluster, cluster_id, skip_root_cluster);
    if own > child_total {
        for (start, end) in spans.into_iter().rev() {
            selected.drain(start..end);
        }
        selected.push(cluster_id);
        own
    } else {
        child_total
    }
}

/// Runs the C5 selection walk and assigns labels/probabilities.
///
/// When `skip_root_cluster` is set, the root cluster's stability is forced
/// to 0 for the purposes of the selection comparison, so it can never win
/// outright against real children. A root with no
/// condensed children is still selected through the ordinary leaf base
/// case: forcing only changes the *comparison*, not whether a childless
/// cluster is eligible at all.
pub(crate) fn extract(
    n: usize,
    arena: &[Cluster],
    condensed: &CondensedForest,
    skip_root_cluster: bool,
) -> ExtractionOutput {
    let mut labels = vec![-1i64; n];
    let mut probabilities = vec![0.0f32; n];

    if condensed.ids.is_empty() {
        return ExtractionOutput { labels, probabilities };
    }

    let mut selected = Vec::new();
    select_stable_clusters_inner(arena, condensed, 0, skip_root_cluster, &mut selected);

    selected.sort_unstable();
    for (label, cluster_id) in selected.into_iter().enumerate() {
        let cluster = &arena[cluster_id];
        let label = label as i64;
        for &p in &cluster.members {
            labels[p] = label;
            let min_reach = cluster.min_reach.get(&p).copied().unwrap_or(0.0);
            let prob = if cluster.birth_distance <= 0.0 {
                1.0
            } else {
                1.0 - (min_reach / cluster.birth_distance)
            };
            probabilities[p] = prob.clamp(0.0, 1.0);
        }
    }

    ExtractionOutput { labels, probabilities }
}
