//! Minimum spanning tree construction over a dense mutual-reachability
//! matrix (C2).
//!
//! This crate has no sparse edge harvest — the whole `n x n`
//! mutual-reachability matrix is already materialised — so a dense O(n^2)
//! Prim scan is the better fit: it reuses the same storage and gains
//! nothing from a priority queue.

use tracing::instrument;

use crate::mutual_reachability::MutualReachability;

/// Errors returned while computing a minimum spanning tree.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub(crate) enum MstError {
    /// An internal invariant was violated, indicating a logic error.
    #[error("MST invariant violated: {invariant}")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
    },
}

/// A single MST edge. Endpoints are interchangeable for downstream stages;
/// `source`/`target` simply record discovery order from Prim's algorithm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MstEdge {
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) weight: f32,
}

/// Computes a minimum spanning tree of `matrix` using Prim's algorithm with
/// an explicit O(n^2) dense scan, starting from vertex 0.
///
/// Ties in `best_weight` are broken by selecting the smallest unvisited
/// vertex index, so output is fully deterministic.
///
/// # Errors
/// Returns [`MstError::InvariantViolation`] if the scan fails to find a next
/// vertex while unvisited vertices remain — this cannot happen for a finite
/// matrix with non-negative weights and indicates an implementation bug.
#[instrument(name = "mst.prim", skip(matrix), fields(n = matrix.len()))]
pub(crate) fn prim_mst(matrix: &MutualReachability) -> Result<Vec<MstEdge>, MstError> {
    let n = matrix.len();
    if n <= 1 {
        return Ok(Vec::new());
    }

    let mut visited = vec![false; n];
    let mut best_weight = vec![f32::INFINITY; n];
    let mut best_from = vec![0usize; n];
    visited[0] = true;
    for v in 1..n {
        best_weight[v] = matrix.get(0, v);
        best_from[v] = 0;
    }

    let mut edges = Vec::with_capacity(n - 1);
    for _ in 0..(n - 1) {
        let next = (0..n)
            .filter(|&v| !visited[v])
            .min_by(|&a, &b| {
                best_weight[a]
                    .total_cmp(&best_weight[b])
                    .then_with(|| a.cmp(&b))
            })
            .ok_or(MstError::InvariantViolation {
                invariant: "prim scan ran out of unvisited vertices before n-1 edges were emitted",
            })?;

        edges.push(MstEdge {
            source: best_from[next],
            target: next,
            weight: best_weight[next],
        });
        visited[next] = true;

        for v in 0..n {
            if visited[v] {
                continue;
            }
            let weight = matrix.get(next, v);
            if weight < best_weight[v] {
                best_weight[v] = weight;
                best_from[v] = next;
            }
        }
    }

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutual_reachability;

    fn matrix_from(points: &[Vec<f32>], min_samples: usize) -> MutualReachability {
        mutual_reachability::build(points, min_samples)
    }

    #[test]
    fn empty_for_single_point() {
        let m = matrix_from(&[vec![0.0, 0.0]], 1);
        let edges = prim_mst(&m).expect("single point MST must succeed");
        assert!(edges.is_empty());
    }

    #[test]
    fn has_n_minus_one_edges_and_connects_all_points() {
        let points = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![5.0, 5.0],
        ];
        let m = matrix_from(&points, 2);
        let edges = prim_mst(&m).expect("MST must succeed");
        assert_eq!(edges.len(), points.len() - 1);

        let mut seen = vec![false; points.len()];
        seen[0] = true;
        for edge in &edges {
            seen[edge.source] = true;
            seen[edge.target] = true;
        }
        assert!(seen.iter().all(|&s| s), "MST must span every point");
    }

    #[test]
    fn deterministic_across_runs() {
        let points = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
        ];
        let m = matrix_from(&points, 2);
        let first = prim_mst(&m).expect("MST must succeed");
        let second = prim_mst(&m).expect("MST must succeed");
        assert_eq!(first, second);
    }
}
