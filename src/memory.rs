//! Pre-flight memory estimation for the clustering pipeline.
//!
//! Provides a conservative estimate of peak memory consumption so callers can
//! be warned about oversized datasets before the dense matrix allocation
//! happens. This crate has no ANN graph or distance cache to size; the
//! dominant term is the dense `n x n` mutual-reachability matrix itself.

/// Safety multiplier applied to the raw estimate to cover heap
/// fragmentation and transient allocations during hierarchy construction.
const SAFETY_MULTIPLIER_NUMERATOR: u64 = 3;
const SAFETY_MULTIPLIER_DENOMINATOR: u64 = 2;

/// Size of an `f32` entry in the mutual-reachability matrix.
const F32_BYTES: u64 = 4;

/// Size of a single `MstEdge` (`source: usize`, `target: usize`,
/// `weight: f32`, padded).
const MST_EDGE_BYTES: u64 = 24;

/// Estimated per-cluster overhead in the hierarchy arena: member `Vec`,
/// member `HashSet`, `min_reach` `HashMap`, plus scalar fields. The arena
/// can hold at most `2n - 1` clusters.
const CLUSTER_OVERHEAD_BYTES: u64 = 96;

/// Returns a conservative estimate of peak memory (in bytes) this crate's
/// pipeline will require for `point_count` points.
///
/// Covers the dense mutual-reachability matrix (`n^2` `f32`s), the MST edge
/// list (`n` edges), and the worst-case cluster arena (`2n - 1` clusters). A
/// 1.5x safety multiplier accounts for heap fragmentation and transient
/// allocations made while building the hierarchy.
///
/// # Examples
///
/// ```
/// use hdbscan_core::estimate_peak_bytes;
///
/// let bytes = estimate_peak_bytes(1_000);
/// assert!(bytes > 0, "estimate must be positive for non-empty datasets");
/// assert_eq!(estimate_peak_bytes(0), 0, "empty dataset requires no memory");
/// ```
#[must_use]
pub fn estimate_peak_bytes(point_count: usize) -> u64 {
    if point_count == 0 {
        return 0;
    }

    let n = point_count as u64;

    let matrix = n.saturating_mul(n).saturating_mul(F32_BYTES);
    let mst_edges = n.saturating_mul(MST_EDGE_BYTES);
    let cluster_arena = (n.saturating_mul(2))
        .saturating_sub(1)
        .saturating_mul(CLUSTER_OVERHEAD_BYTES);

    let subtotal = matrix.saturating_add(mst_edges).saturating_add(cluster_arena);

    subtotal
        .saturating_mul(SAFETY_MULTIPLIER_NUMERATOR)
        .saturating_div(SAFETY_MULTIPLIER_DENOMINATOR)
}

/// Formats a byte count as a human-readable string using binary units.
///
/// # Examples
///
/// ```
/// use hdbscan_core::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    const GIB: u64 = 1024 * MIB;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
