//! Single-linkage hierarchy construction, condensation, and stability-based
//! extraction (C3, C4, C5).
//!
//! The hierarchy is built top-down: starting from a root cluster spanning
//! every point, MST edges are walked in descending weight order and a
//! [`Cluster`] is only materialised at an edge that actually splits a
//! surviving component into two or more pieces. Clusters live in a flat
//! arena addressed by `usize` id rather than an owned tree, connectivity
//! queries during a split use an iterative path-compressing union-find, and
//! stability selection is a recursive push-then-possibly-revert walk.

mod condense;
mod extract;
mod union_find;

use std::collections::HashMap;

use thiserror::Error;
use tracing::instrument;

use crate::mst::MstEdge;
use union_find::DisjointSet;

pub(crate) use condense::CondensedForest;
pub(crate) use extract::ExtractionOutput;

/// Errors raised while building or extracting the cluster hierarchy.
///
/// Every variant names an internal invariant; none are reachable from valid
/// caller input; callers only see these wrapped in
/// [`crate::error::HdbscanError::InvariantViolation`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub(crate) enum HierarchyError {
    /// No cluster in the arena contained both endpoints of an MST edge.
    #[error("hierarchy invariant violated: {invariant}")]
    InvariantViolation { invariant: &'static str },
}

impl HierarchyError {
    /// Name of the violated invariant, consumed by
    /// [`crate::error::HdbscanError`]'s conversion impl.
    pub(crate) fn invariant(&self) -> &'static str {
        match self {
            Self::InvariantViolation { invariant } => invariant,
        }
    }
}

/// A node in the cluster arena.
///
/// Clusters are addressed by their index into the arena `Vec<Cluster>`
/// returned by [`build`]; there is no owned parent/child tree.
#[derive(Clone, Debug)]
pub(crate) struct Cluster {
    pub(crate) id: usize,
    pub(crate) members: Vec<usize>,
    member_set: std::collections::HashSet<usize>,
    pub(crate) birth_distance: f32,
    pub(crate) leave_edge_weight: f32,
    pub(crate) min_reach: HashMap<usize, f32>,
    pub(crate) left_child: Option<usize>,
    pub(crate) right_child: Option<usize>,
    /// Overrides the formula-computed stability used during extraction.
    /// `Some(0.0)` marks a "persisting" cluster, where one side of a split
    /// fell below `min_cluster_size` and the other carries on as this
    /// cluster's sole child; `None` means extraction should compute
    /// stability from `min_reach`/`birth_distance` in the usual way.
    pub(crate) forced_stability: Option<f32>,
    /// Set once a split attempt finds no surviving component of at least
    /// `min_cluster_size`, so a later, lighter edge that also touches this
    /// cluster's members is not mistaken for a fresh split opportunity even
    /// though the cluster has already been decided as a leaf. See
    /// `DESIGN.md`.
    terminal: bool,
}

impl Cluster {
    fn has_children(&self) -> bool {
        self.left_child.is_some() || self.right_child.is_some()
    }
}

/// Builds a global point-to-neighbour-weight adjacency list from MST edges.
fn build_adjacency(n: usize, edges: &[MstEdge]) -> Vec<Vec<(usize, f32)>> {
    let mut adjacency = vec![Vec::new(); n];
    for edge in edges {
        adjacency[edge.source].push((edge.target, edge.weight));
        adjacency[edge.target].push((edge.source, edge.weight));
    }
    adjacency
}

/// Computes the min_reach map and derived `leave_edge_weight` for a
/// candidate cluster's member set, using only neighbours that are
/// themselves members. `min_reach(p)` is the *smallest* weight among `p`'s
/// incident MST edges whose other endpoint is also a member, not the
/// largest; a point with no in-cluster neighbour (a singleton) has no such
/// edge and its min_reach is `0.0`.
fn min_reach_for(
    members: &[usize],
    member_set: &std::collections::HashSet<usize>,
    adjacency: &[Vec<(usize, f32)>],
) -> (HashMap<usize, f32>, f32) {
    let mut min_reach = HashMap::with_capacity(members.len());
    let mut leave_edge_weight = 0.0f32;
    for &p in members {
        let smallest = adjacency[p]
            .iter()
            .filter(|(other, _)| member_set.contains(other))
            .map(|&(_, weight)| weight)
            .reduce(f32::min)
            .unwrap_or(0.0);
        leave_edge_weight = leave_edge_weight.max(smallest);
        min_reach.insert(p, smallest);
    }
    (min_reach, leave_edge_weight)
}

fn push_cluster(
    arena: &mut Vec<Cluster>,
    members: Vec<usize>,
    birth_distance: f32,
    adjacency: &[Vec<(usize, f32)>],
) -> usize {
    let member_set: std::collections::HashSet<usize> = members.iter().copied().collect();
    let (min_reach, leave_edge_weight) = min_reach_for(&members, &member_set, adjacency);
    let id = arena.len();
    arena.push(Cluster {
        id,
        members,
        member_set,
        birth_distance,
        leave_edge_weight,
        min_reach,
        left_child: None,
        right_child: None,
        forced_stability: None,
        terminal: false,
    });
    id
}

/// Finds the innermost (most recently created) cluster whose members
/// contain both `u` and `v`. Newest-first search is what makes this
/// "innermost": later clusters are always proper subsets of the clusters
/// that spawned them.
fn find_parent(arena: &[Cluster], u: usize, v: usize) -> Option<usize> {
    arena
        .iter()
        .rev()
        .find(|c| c.member_set.contains(&u) && c.member_set.contains(&v))
        .map(|c| c.id)
}

/// Splits `parent`'s members into components using only the edges in
/// `remaining` (those strictly after the current edge in descending-weight
/// order), restricted to endpoints within `parent`'s members.
fn split_components(
    n: usize,
    parent: &Cluster,
    remaining: &[MstEdge],
) -> Vec<Vec<usize>> {
    let mut dsu = DisjointSet::new(n);
    for edge in remaining {
        if parent.member_set.contains(&edge.source) && parent.member_set.contains(&edge.target) {
            dsu.union(edge.source, edge.target);
        }
    }

    let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
    for &p in &parent.members {
        groups.entry(dsu.find(p)).or_default().push(p);
    }

    let mut components: Vec<Vec<usize>> = groups.into_values().collect();
    // Deterministic order: largest first, ties broken by smallest member id.
    components.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| a.iter().min().cmp(&b.iter().min()))
    });
    components
}

/// Builds the cluster arena by walking MST edges in descending weight order
/// and splitting the innermost surviving cluster at each edge that
/// disconnects it.
///
/// # Errors
/// Returns [`HierarchyError::InvariantViolation`] if an MST edge's endpoints
/// are not both contained in any arena cluster, which would indicate a
/// malformed MST.
#[instrument(name = "hierarchy.build", skip(edges), fields(n, min_cluster_size))]
pub(crate) fn build(
    n: usize,
    edges: &[MstEdge],
    min_cluster_size: usize,
) -> Result<Vec<Cluster>, HierarchyError> {
    let adjacency = build_adjacency(n, edges);

    let mut sorted: Vec<MstEdge> = edges.to_vec();
    sorted.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| (a.source.min(a.target)).cmp(&(b.source.min(b.target))))
            .then_with(|| (a.source.max(a.target)).cmp(&(b.source.max(b.target))))
    });

    let root_members: Vec<usize> = (0..n).collect();
    let root_birth = sorted.first().map_or(0.0, |e| e.weight);
    let mut arena = Vec::with_capacity(2 * n);
    push_cluster(&mut arena, root_members, root_birth, &adjacency);

    for idx in 0..sorted.len() {
        let edge = sorted[idx];
        let parent_id = match find_parent(&arena, edge.source, edge.target) {
            Some(id) => id,
            None => {
                return Err(HierarchyError::InvariantViolation {
                    invariant: "mst edge endpoints were not both contained in any cluster",
                })
            }
        };

        if arena[parent_id].has_children() || arena[parent_id].terminal {
            continue;
        }

        // A zero-weight edge connects coincident points: there is no
        // density threshold at which "falling out" is meaningful, only an
        // arbitrary tie-break artifact. Without this guard, a cluster of
        // exact duplicates could have points permanently peeled off as
        // noise by the persisting-split rule below, when identical points
        // should always land in a single cluster with no noise.
        if edge.weight <= 0.0 {
            continue;
        }

        let components = split_components(n, &arena[parent_id], &sorted[idx + 1..]);
        if components.len() <= 1 {
            continue;
        }

        let mut big: Vec<Vec<usize>> = components
            .iter()
            .filter(|c| c.len() >= min_cluster_size)
            .cloned()
            .collect();

        match big.len() {
            0 => {
                // Both (or all) surviving components are below
                // min_cluster_size: the cluster dies here. No children are
                // materialised; its members remain attached to it and it
                // becomes a terminal leaf for extraction purposes.
                arena[parent_id].terminal = true;
            }
            1 => {
                // One side persists, one (or more) falls out as noise at
                // this distance. The parent is not a genuine new cluster
                // boundary, so its stability is forced to zero rather than
                // computed from its epsilon range.
                let child_members = big.pop().expect("checked len == 1");
                let child_id = push_cluster(&mut arena, child_members, edge.weight, &adjacency);
                arena[parent_id].forced_stability = Some(0.0);
                arena[parent_id].left_child = Some(child_id);
            }
            _ => {
                // Two (or, in the rare exact-tie case, more) components
                // clear the threshold. Only the two largest become
                // children; any additional big components are a
                // degenerate generalisation beyond the usual two-component
                // split (see DESIGN.md) and are left attached only to the
                // parent.
                let right_members = big.remove(1);
                let left_members = big.remove(0);
                let left_id = push_cluster(&mut arena, left_members, edge.weight, &adjacency);
                let right_id = push_cluster(&mut arena, right_members, edge.weight, &adjacency);
                arena[parent_id].left_child = Some(left_id);
                arena[parent_id].right_child = Some(right_id);
            }
        }
    }

    Ok(arena)
}

pub(crate) use condense::condense;
pub(crate) use extract::extract;
