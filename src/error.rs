//! Error types for the `hdbscan-core` library.
//!
//! Defines the error enums exposed by the public API and a convenient result
//! alias, following the stable-code-plus-`thiserror`-variant shape used
//! throughout this crate's other error types.

use std::fmt;

use thiserror::Error;

/// Stable codes describing [`HdbscanError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum HdbscanErrorCode {
    /// `min_cluster_size` was zero.
    InvalidMinClusterSize,
    /// `min_samples` was zero.
    InvalidMinSamples,
    /// The input point set was empty.
    EmptyInput,
    /// Input points did not share a common dimensionality.
    DimensionMismatch,
    /// Points had zero dimensions.
    ZeroDimension,
    /// A point coordinate was not finite.
    NonFiniteCoordinate,
    /// An internal invariant was violated during `fit`.
    InvariantViolation,
}

impl HdbscanErrorCode {
    /// Returns the stable, machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidMinClusterSize => "HDBSCAN_INVALID_MIN_CLUSTER_SIZE",
            Self::InvalidMinSamples => "HDBSCAN_INVALID_MIN_SAMPLES",
            Self::EmptyInput => "HDBSCAN_EMPTY_INPUT",
            Self::DimensionMismatch => "HDBSCAN_DIMENSION_MISMATCH",
            Self::ZeroDimension => "HDBSCAN_ZERO_DIMENSION",
            Self::NonFiniteCoordinate => "HDBSCAN_NON_FINITE_COORDINATE",
            Self::InvariantViolation => "HDBSCAN_INVARIANT_VIOLATION",
        }
    }
}

impl fmt::Display for HdbscanErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced when constructing or running [`crate::Hdbscan`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HdbscanError {
    /// `min_cluster_size` must be at least 1.
    #[error("min_cluster_size must be at least 1 (got {got})")]
    InvalidMinClusterSize {
        /// The rejected value.
        got: usize,
    },
    /// `min_samples` must be at least 1.
    #[error("min_samples must be at least 1 (got {got})")]
    InvalidMinSamples {
        /// The rejected value.
        got: usize,
    },
    /// `fit` was called with no points.
    #[error("cannot fit an empty point set")]
    EmptyInput,
    /// Points did not all share the same dimensionality.
    #[error("point {index} has dimension {got}, expected {expected}")]
    DimensionMismatch {
        /// Index of the offending point.
        index: usize,
        /// Dimension observed at `index`.
        got: usize,
        /// Dimension established by the first point.
        expected: usize,
    },
    /// Points had zero dimensions; at least one coordinate is required.
    #[error("points must have at least one dimension")]
    ZeroDimension,
    /// A coordinate was NaN or infinite.
    #[error("point {index}, coordinate {axis} is not finite: {value}")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
        /// Axis (dimension) of the offending coordinate.
        axis: usize,
        /// The invalid value observed.
        value: f32,
    },
    /// An internal invariant was violated while building the hierarchy.
    ///
    /// This indicates an implementation bug rather than invalid caller input.
    /// `labels_`/`probabilities_` are left at their pre-`fit` values when
    /// this variant is returned.
    #[error("hdbscan invariant violated: {invariant}")]
    InvariantViolation {
        /// Name of the violated invariant, for diagnostics.
        invariant: &'static str,
    },
}

impl HdbscanError {
    /// Retrieves the stable [`HdbscanErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> HdbscanErrorCode {
        match self {
            Self::InvalidMinClusterSize { .. } => HdbscanErrorCode::InvalidMinClusterSize,
            Self::InvalidMinSamples { .. } => HdbscanErrorCode::InvalidMinSamples,
            Self::EmptyInput => HdbscanErrorCode::EmptyInput,
            Self::DimensionMismatch { .. } => HdbscanErrorCode::DimensionMismatch,
            Self::ZeroDimension => HdbscanErrorCode::ZeroDimension,
            Self::NonFiniteCoordinate { .. } => HdbscanErrorCode::NonFiniteCoordinate,
            Self::InvariantViolation { .. } => HdbscanErrorCode::InvariantViolation,
        }
    }
}

impl From<crate::hierarchy::HierarchyError> for HdbscanError {
    fn from(error: crate::hierarchy::HierarchyError) -> Self {
        Self::InvariantViolation {
            invariant: error.invariant(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, HdbscanError>;
