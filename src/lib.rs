//! Density-based hierarchical clustering (HDBSCAN) core pipeline.
//!
//! This crate computes flat, density-based clusters from a set of points by
//! running five stages in sequence:
//!
//! 1. **Mutual reachability** ([`mutual_reachability`]) - core distances and
//!    the dense mutual-reachability matrix.
//! 2. **MST** ([`mst`]) - a minimum spanning tree over that matrix.
//! 3. **Hierarchy** ([`hierarchy`]) - a single-linkage dendrogram built by
//!    cutting the MST at descending edge weights.
//! 4. **Condensation** - dropping clusters below `min_cluster_size`.
//! 5. **Extraction** - selecting the most stable flat clustering.
//!
//! Build an engine with [`HdbscanBuilder`], run it with [`Hdbscan::fit`],
//! and read results back with [`Hdbscan::labels`] and
//! [`Hdbscan::probabilities`]. Acceleration structures (HNSW/ANN), alternate
//! distance metrics, streaming/incremental fits, and parallelism are
//! explicit non-goals.

mod builder;
mod distance;
mod error;
mod hdbscan;
mod hierarchy;
mod memory;
mod mst;
mod mutual_reachability;

pub use builder::HdbscanBuilder;
pub use distance::euclidean_distance;
pub use error::{HdbscanError, HdbscanErrorCode, Result};
pub use hdbscan::Hdbscan;
pub use memory::{estimate_peak_bytes, format_bytes};
