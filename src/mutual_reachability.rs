//! Mutual-reachability distance transform (C1).
//!
//! Converts a set of raw points into the dense `n x n` mutual-reachability
//! matrix consumed by [`crate::mst`].

use tracing::instrument;

use crate::error::HdbscanError;

/// Validates that every point shares the first point's dimensionality and
/// that every coordinate is finite.
///
/// # Errors
/// Returns [`HdbscanError::EmptyInput`] when `points` is empty,
/// [`HdbscanError::DimensionMismatch`] when dimensions differ, and
/// [`HdbscanError::NonFiniteCoordinate`] when a coordinate is NaN or
/// infinite.
pub(crate) fn validate_points(points: &[Vec<f32>]) -> Result<usize, HdbscanError> {
    let Some(first) = points.first() else {
        return Err(HdbscanError::EmptyInput);
    };
    let dimension = first.len();
    if dimension == 0 {
        return Err(HdbscanError::ZeroDimension);
    }

    for (index, point) in points.iter().enumerate() {
        if point.len() != dimension {
            return Err(HdbscanError::DimensionMismatch {
                index,
                got: point.len(),
                expected: dimension,
            });
        }
        for (axis, &value) in point.iter().enumerate() {
            if !value.is_finite() {
                return Err(HdbscanError::NonFiniteCoordinate {
                    index,
                    axis,
                    value,
                });
            }
        }
    }

    Ok(dimension)
}

/// Computes the core distance of every point: the distance to its `k`-th
/// nearest neighbour, with `k = min(min_samples - 1, n - 2)` (0-indexed,
/// excluding the point itself).
///
/// For `n == 1` there are no neighbours and the single core distance is `0`.
fn core_distances(points: &[Vec<f32>], min_samples: usize) -> Vec<f32> {
    let n = points.len();
    if n <= 1 {
        return vec![0.0; n];
    }

    let k = min_samples.saturating_sub(1).min(n - 2);
    let mut out = Vec::with_capacity(n);
    for (i, point) in points.iter().enumerate() {
        let mut distances: Vec<f32> = points
            .iter()
            .enumerate()
            .filter_map(|(j, other)| {
                (j != i).then(|| crate::distance::euclidean_distance(point, other))
            })
            .collect();
        distances.sort_by(f32::total_cmp);
        out.push(distances[k]);
    }
    out
}

/// The dense `n x n` mutual-reachability matrix, stored row-major.
#[derive(Debug, Clone)]
pub(crate) struct MutualReachability {
    n: usize,
    weights: Vec<f32>,
    pub(crate) core_distances: Vec<f32>,
}

impl MutualReachability {
    /// Returns `M[i][j]`.
    pub(crate) fn get(&self, i: usize, j: usize) -> f32 {
        self.weights[i * self.n + j]
    }

    pub(crate) fn len(&self) -> usize {
        self.n
    }
}

/// Builds the mutual-reachability matrix for `points` given `min_samples`.
///
/// `M[i][j] = max(dist(i, j), core(i), core(j))`, `M[i][i] = core(i)`.
#[instrument(name = "mutual_reachability.build", skip(points), fields(n = points.len(), min_samples))]
pub(crate) fn build(points: &[Vec<f32>], min_samples: usize) -> MutualReachability {
    let n = points.len();
    let core = core_distances(points, min_samples);

    let mut weights = vec![0.0f32; n * n];
    for i in 0..n {
        weights[i * n + i] = core[i];
        for j in (i + 1)..n {
            let dist = crate::distance::euclidean_distance(&points[i], &points[j]);
            let weight = dist.max(core[i]).max(core[j]);
            weights[i * n + j] = weight;
            weights[j * n + i] = weight;
        }
    }

    MutualReachability {
        n,
        weights,
        core_distances: core,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(coords: &[f32]) -> Vec<f32> {
        coords.to_vec()
    }

    #[test]
    fn single_point_has_zero_matrix() {
        let points = vec![pt(&[1.0, 1.0])];
        let m = build(&points, 1);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(0, 0), 0.0);
    }

    #[test]
    fn symmetric_and_nonnegative() {
        let points = vec![pt(&[0.0, 0.0]), pt(&[1.0, 0.0]), pt(&[0.0, 2.0])];
        let m = build(&points, 2);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!(m.get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn weight_is_at_least_direct_distance() {
        let points = vec![pt(&[0.0, 0.0]), pt(&[1.0, 0.0]), pt(&[5.0, 5.0])];
        let m = build(&points, 2);
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    continue;
                }
                let dist = crate::distance::euclidean_distance(&points[i], &points[j]);
                assert!(m.get(i, j) >= dist - 1e-6);
            }
        }
    }

    #[test]
    fn min_samples_clamped_when_exceeding_n() {
        let points = vec![pt(&[0.0]), pt(&[1.0]), pt(&[3.0])];
        // min_samples = 10 clamps k to n - 2 = 1 (second-nearest neighbour).
        let m = build(&points, 10);
        assert_eq!(m.core_distances.len(), 3);
        assert!(m.core_distances.iter().all(|&d| d > 0.0));
    }

    #[test]
    fn rejects_empty_input() {
        let err = validate_points(&[]).expect_err("empty points must be rejected");
        assert!(matches!(err, HdbscanError::EmptyInput));
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let points = vec![pt(&[0.0, 0.0]), pt(&[1.0])];
        let err = validate_points(&points).expect_err("mismatched dimensions must be rejected");
        assert!(matches!(
            err,
            HdbscanError::DimensionMismatch {
                index: 1,
                got: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn rejects_non_finite_coordinate() {
        let points = vec![pt(&[0.0, f32::NAN])];
        let err = validate_points(&points).expect_err("NaN coordinates must be rejected");
        assert!(matches!(
            err,
            HdbscanError::NonFiniteCoordinate { index: 0, axis: 1, .. }
        ));
    }
}
