//! Single-particle spin operators.
//!
//! Basis vectors are ordered by magnetic quantum number `m = s, s - 1, ..., -s`,
//! so index 0 is "up" and index `2s` is fully "down". Spin quantum numbers are
//! validated: anything other than a finite, non-negative half-integer is
//! rejected with [`HilbertError::BadSpin`].

use crate::{error::HilbertError, HResult, Matrix};
use faer::Mat;
use std::str::FromStr;

// tolerance of the Kronecker delta on (half-integer) magnetic numbers
const DELTA_EPSILON: f64 = 1e-4;

/// Validate `spin` and return the single-particle dimension `2s + 1`.
pub fn dim(spin: f64) -> HResult<usize> {
    let two_s = 2.0 * spin;
    if !spin.is_finite() || spin < 0.0 || (two_s - two_s.round()).abs() > 1e-9 {
        return Err(HilbertError::BadSpin(spin));
    }
    Ok(two_s.round() as usize + 1)
}

/// Recover the spin quantum number from a single-particle dimension.
pub fn spin_of_dim(d: usize) -> f64 {
    (d as f64 - 1.0) / 2.0
}

fn delta(a: f64, b: f64) -> f64 {
    if (a - b).abs() < DELTA_EPSILON {
        1.0
    } else {
        0.0
    }
}

// magnetic number of basis index `k`
fn m_of(spin: f64, k: usize) -> f64 {
    spin - k as f64
}

fn build<F>(spin: f64, el: F) -> HResult<Matrix>
where
    F: Fn(f64, f64) -> f64,
{
    let d = dim(spin)?;
    Ok(Mat::from_fn(d, d, |row, col| el(m_of(spin, row), m_of(spin, col))))
}

/// Identity on the `2s + 1`-dimensional space.
pub fn id(spin: f64) -> HResult<Matrix> {
    let d = dim(spin)?;
    Ok(Mat::identity(d, d))
}

/// `Sz`: diagonal with entries `m`.
pub fn sz(spin: f64) -> HResult<Matrix> {
    build(spin, |m, n| delta(m, n) * n)
}

/// Raising operator: `⟨m|S+|n⟩ = δ(m, n + 1) √(s(s + 1) - m n)`.
pub fn sp(spin: f64) -> HResult<Matrix> {
    let s2 = spin * (spin + 1.0);
    build(spin, |m, n| delta(m, n + 1.0) * (s2 - m * n).max(0.0).sqrt())
}

/// Lowering operator: `⟨m|S-|n⟩ = δ(m + 1, n) √(s(s + 1) - m n)`.
pub fn sm(spin: f64) -> HResult<Matrix> {
    let s2 = spin * (spin + 1.0);
    build(spin, |m, n| delta(m + 1.0, n) * (s2 - m * n).max(0.0).sqrt())
}

/// Named single-particle operator, as selected in run configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpinOperator {
    Id,
    Sz,
    Sp,
    Sm,
}

impl SpinOperator {
    /// Matrix representation for spin quantum number `spin`.
    pub fn matrix(self, spin: f64) -> HResult<Matrix> {
        match self {
            Self::Id => id(spin),
            Self::Sz => sz(spin),
            Self::Sp => sp(spin),
            Self::Sm => sm(spin),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Sz => "Sz",
            Self::Sp => "Sp",
            Self::Sm => "Sm",
        }
    }
}

impl FromStr for SpinOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Id" | "id" => Ok(Self::Id),
            "Sz" | "sz" => Ok(Self::Sz),
            "Sp" | "sp" => Ok(Self::Sp),
            "Sm" | "sm" => Ok(Self::Sm),
            other => Err(format!("unknown spin operator {other:?}")),
        }
    }
}
