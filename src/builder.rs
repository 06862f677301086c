//! Builder for [`crate::Hdbscan`], following a validate-then-construct
//! shape.

use crate::error::{HdbscanError, Result};
use crate::Hdbscan;

/// Constructs an [`Hdbscan`] engine with validated configuration.
#[derive(Clone, Debug)]
pub struct HdbscanBuilder {
    min_cluster_size: usize,
    min_samples: Option<usize>,
    skip_root_cluster: bool,
    debug_mode: bool,
    memory_budget_bytes: Option<u64>,
}

impl Default for HdbscanBuilder {
    fn default() -> Self {
        Self {
            min_cluster_size: 5,
            min_samples: None,
            skip_root_cluster: true,
            debug_mode: false,
            memory_budget_bytes: None,
        }
    }
}

impl HdbscanBuilder {
    /// Creates a builder with the documented defaults:
    /// `min_cluster_size = 5`, `min_samples` defaulting to
    /// `min_cluster_size`, `skip_root_cluster = true`, `debug_mode = false`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum number of points a cluster must retain to survive
    /// condensation. Must be at least 1.
    #[must_use]
    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    /// Sets the neighbour count used for the core-distance computation.
    /// Defaults to `min_cluster_size` when not called. Must be at least 1.
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = Some(min_samples);
        self
    }

    /// Controls whether the root cluster itself may be selected as a single
    /// flat cluster spanning the whole dataset.
    #[must_use]
    pub fn with_skip_root_cluster(mut self, skip_root_cluster: bool) -> Self {
        self.skip_root_cluster = skip_root_cluster;
        self
    }

    /// Enables verbose `tracing` diagnostics during `fit`.
    #[must_use]
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Sets a soft memory budget, in bytes. When set, `fit` logs a `warn!`
    /// if the pre-flight estimate from [`crate::estimate_peak_bytes`]
    /// exceeds this budget. Purely advisory: it never rejects input or
    /// changes clustering results.
    #[must_use]
    pub fn with_memory_budget_bytes(mut self, memory_budget_bytes: u64) -> Self {
        self.memory_budget_bytes = Some(memory_budget_bytes);
        self
    }

    /// Validates configuration and constructs the engine.
    ///
    /// # Errors
    /// Returns [`HdbscanError::InvalidMinClusterSize`] or
    /// [`HdbscanError::InvalidMinSamples`] when either parameter is zero.
    pub fn build(self) -> Result<Hdbscan> {
        if self.min_cluster_size == 0 {
            return Err(HdbscanError::InvalidMinClusterSize { got: 0 });
        }
        let min_samples = self.min_samples.unwrap_or(self.min_cluster_size);
        if min_samples == 0 {
            return Err(HdbscanError::InvalidMinSamples { got: 0 });
        }

        Ok(Hdbscan::new(
            self.min_cluster_size,
            min_samples,
            self.skip_root_cluster,
            self.debug_mode,
            self.memory_budget_bytes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let hdbscan = HdbscanBuilder::new().build().expect("defaults must be valid");
        assert_eq!(hdbscan.min_cluster_size(), 5);
        assert_eq!(hdbscan.min_samples(), 5);
        assert!(hdbscan.skip_root_cluster());
    }

    #[test]
    fn min_samples_defaults_to_min_cluster_size() {
        let hdbscan = HdbscanBuilder::new()
            .with_min_cluster_size(8)
            .build()
            .expect("valid config");
        assert_eq!(hdbscan.min_samples(), 8);
    }

    #[test]
    fn rejects_zero_min_cluster_size() {
        let err = HdbscanBuilder::new()
            .with_min_cluster_size(0)
            .build()
            .expect_err("zero min_cluster_size must be rejected");
        assert!(matches!(err, HdbscanError::InvalidMinClusterSize { got: 0 }));
    }

    #[test]
    fn memory_budget_defaults_to_unset() {
        let hdbscan = HdbscanBuilder::new()
            .with_memory_budget_bytes(1_000)
            .build()
            .expect("valid config");
        // No public accessor exposes the budget; this just confirms the
        // builder method composes with the rest of the chain without
        // disturbing validation.
        assert_eq!(hdbscan.min_cluster_size(), 5);
    }

    #[test]
    fn rejects_zero_min_samples() {
        let err = HdbscanBuilder::new()
            .with_min_samples(0)
            .build()
            .expect_err("zero min_samples must be rejected");
        assert!(matches!(err, HdbscanError::InvalidMinSamples { got: 0 }));
    }
}
