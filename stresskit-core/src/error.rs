//! Error types for stresskit operations.

use thiserror::Error;

/// Result type alias using stresskit Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Message used for every malformed stress tensor input.
pub(crate) const SHAPE_MESSAGE: &str = "components must be a 6-element vector or 3x3 matrix";

/// Errors that can occur during stresskit operations.
///
/// Only structural problems are reported. Physically implausible values
/// (Poisson's ratio outside (-1, 0.5), non-orthonormal rotation matrices)
/// pass through the rosette and tensor operations untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed stress tensor input.
    #[error("construction error: {0}")]
    Construction(String),

    /// Timestamp absent from a stress time series.
    #[error("lookup error: {0}")]
    MissingTimestamp(String),

    /// Unrecognized tensor component name.
    #[error("invalid component: {0}")]
    InvalidComponent(String),

    /// Gauge or field sequences of different lengths.
    #[error("length mismatch: expected {expected} values, found {found}")]
    LengthMismatch {
        /// Length of the first sequence.
        expected: usize,
        /// Length of the offending sequence.
        found: usize,
    },

    /// Invalid material properties.
    #[error("invalid material: {0}")]
    InvalidMaterial(String),
}

impl Error {
    /// Creates the canonical tensor shape error.
    pub(crate) fn shape() -> Self {
        Self::Construction(SHAPE_MESSAGE.into())
    }

    /// Creates a missing timestamp error.
    pub(crate) fn missing_timestamp() -> Self {
        Self::MissingTimestamp("no data for specified timestamp".into())
    }
}
