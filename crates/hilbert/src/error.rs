//! Error types for operator and state construction.

use thiserror::Error;

/// Returned when two operands that must share a dimension do not.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("dimension mismatch; got {0} and {1}")]
pub struct DimensionError(pub usize, pub usize);

impl DimensionError {
    /// Succeed only if `a == b`.
    pub fn check(a: usize, b: usize) -> Result<(), Self> {
        (a == b).then_some(()).ok_or(Self(a, b))
    }
}

#[derive(Debug, Error)]
pub enum HilbertError {
    /// Spin quantum numbers must be non-negative half-integers.
    #[error("spin quantum number must be a non-negative half-integer; got {0}")]
    BadSpin(f64),

    /// A state specification contained a character other than `u`, `d`, `p`, `m`.
    #[error("invalid character {ch:?} in state specification {spec:?}")]
    InvalidStateSpec { ch: char, spec: String },

    /// Product states need at least two single-particle levels.
    #[error("single-particle dimension must be at least 2; got {0}")]
    BadSingleParticleDim(usize),

    #[error("cannot enumerate a sector of {0} particles")]
    SectorTooLarge(usize),

    #[error("index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}
