//! The [`Hdbscan`] engine: orchestrates C1-C5 into a single `fit` call.
//!
//! A long-lived engine built once via its builder and run repeatedly via
//! `fit`, with an `#[instrument(..., err, ...)]` span wrapping the whole
//! pipeline.

use tracing::{debug, instrument, warn};

use crate::error::{HdbscanError, Result};
use crate::{hierarchy, memory, mst, mutual_reachability};

/// Density-based hierarchical clustering engine.
///
/// Construct with [`crate::HdbscanBuilder`], then call [`Hdbscan::fit`] one
/// or more times. Each `fit` call overwrites the previous run's labels and
/// probabilities, except when `fit` itself returns an error: an
/// [`HdbscanError::InvariantViolation`] leaves `labels`/`probabilities` at
/// their pre-call values.
#[derive(Clone, Debug)]
pub struct Hdbscan {
    min_cluster_size: usize,
    min_samples: usize,
    skip_root_cluster: bool,
    debug_mode: bool,
    memory_budget_bytes: Option<u64>,
    labels: Vec<i64>,
    probabilities: Vec<f32>,
}

impl Hdbscan {
    pub(crate) fn new(
        min_cluster_size: usize,
        min_samples: usize,
        skip_root_cluster: bool,
        debug_mode: bool,
        memory_budget_bytes: Option<u64>,
    ) -> Self {
        Self {
            min_cluster_size,
            min_samples,
            skip_root_cluster,
            debug_mode,
            memory_budget_bytes,
            labels: Vec::new(),
            probabilities: Vec::new(),
        }
    }

    /// The configured minimum cluster size.
    #[must_use]
    pub fn min_cluster_size(&self) -> usize {
        self.min_cluster_size
    }

    /// The configured core-distance neighbour count.
    #[must_use]
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Whether the root cluster is excluded from selection.
    #[must_use]
    pub fn skip_root_cluster(&self) -> bool {
        self.skip_root_cluster
    }

    /// Cluster labels from the most recent successful [`Hdbscan::fit`]
    /// call. `-1` marks noise. Empty before the first successful `fit`.
    #[must_use]
    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    /// Soft cluster-membership probabilities, aligned with [`Hdbscan::labels`].
    #[must_use]
    pub fn probabilities(&self) -> &[f32] {
        &self.probabilities
    }

    /// Runs the full clustering pipeline over `points`
    /// (C1 mutual-reachability -> C2 MST -> C3 hierarchy -> C4 condense ->
    /// C5 extract), storing results in `labels`/`probabilities`.
    ///
    /// # Errors
    /// Returns [`HdbscanError::EmptyInput`], [`HdbscanError::ZeroDimension`],
    /// [`HdbscanError::DimensionMismatch`], or
    /// [`HdbscanError::NonFiniteCoordinate`] for invalid input, and
    /// [`HdbscanError::InvariantViolation`] if an internal invariant is
    /// violated, in which case `labels`/`probabilities` are left unchanged.
    #[instrument(
        name = "hdbscan.fit",
        err,
        skip(self, points),
        fields(n = points.len(), min_cluster_size = self.min_cluster_size, min_samples = self.min_samples)
    )]
    pub fn fit(&mut self, points: &[Vec<f32>]) -> Result<()> {
        let n = mutual_reachability::validate_points(points)?;
        if self.debug_mode {
            debug!(points = points.len(), dimension = n, "validated input points");
        }

        if let Some(budget) = self.memory_budget_bytes {
            let estimate = memory::estimate_peak_bytes(points.len());
            if estimate > budget {
                warn!(
                    estimate = memory::format_bytes(estimate),
                    budget = memory::format_bytes(budget),
                    "estimated peak memory exceeds configured budget"
                );
            }
        }

        let matrix = mutual_reachability::build(points, self.min_samples);
        let n = matrix.len();

        let edges = mst::prim_mst(&matrix).map_err(|e| HdbscanError::InvariantViolation {
            invariant: mst_invariant(&e),
        })?;
        if self.debug_mode {
            debug!(edge_count = edges.len(), "built minimum spanning tree");
        }

        let arena = hierarchy::build(n, &edges, self.min_cluster_size)?;
        if self.debug_mode {
            debug!(cluster_count = arena.len(), "built cluster hierarchy");
        }

        let condensed = hierarchy::condense(&arena, self.min_cluster_size);
        let output = hierarchy::extract(n, &arena, &condensed, self.skip_root_cluster);
        if self.debug_mode {
            let selected = output.labels.iter().filter(|&&l| l >= 0).count();
            debug!(selected, noise = n - selected, "extracted flat clusters");
        }

        self.labels = output.labels;
        self.probabilities = output.probabilities;
        Ok(())
    }
}

fn mst_invariant(error: &mst::MstError) -> &'static str {
    match error {
        mst::MstError::InvariantViolation { invariant } => invariant,
    }
}
