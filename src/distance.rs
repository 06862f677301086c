//! Distance primitives used by the mutual-reachability transform.
//!
//! Only Euclidean distance is supported; alternative metrics are a
//! documented non-goal of this crate.

/// Computes the Euclidean distance between two equal-length coordinate
/// slices.
///
/// Callers are expected to have already validated that `left.len() ==
/// right.len()` and that every coordinate is finite (see
/// [`crate::mutual_reachability::validate_points`]); this function does not
/// re-validate in the hot path.
///
/// # Examples
/// ```
/// use hdbscan_core::euclidean_distance;
///
/// let d = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]);
/// assert!((d - 5.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn euclidean_distance(left: &[f32], right: &[f32]) -> f32 {
    let mut sum = 0.0f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        let diff = f64::from(l) - f64::from(r);
        sum += diff * diff;
    }
    sum.sqrt() as f32
}
