//! Fixed-magnetization sectors of spin-1/2 chains.
//!
//! A computational basis index of `n` spin-1/2 particles is read as a bit
//! string with a set bit for every "down" particle, so a sector of fixed total
//! `Sz` is the set of indices with a given popcount.

use crate::{error::HilbertError, HResult, Matrix};
use faer::{Mat, MatRef};

/// All indices in `[0, 2^particles)` with exactly `down` set bits, ascending.
pub fn basis_indices(particles: usize, down: usize) -> HResult<Vec<usize>> {
    if particles >= usize::BITS as usize {
        return Err(HilbertError::SectorTooLarge(particles));
    }
    Ok((0..1_usize << particles)
        .filter(|k| k.count_ones() as usize == down)
        .collect())
}

fn check_indices(dim: usize, indices: &[usize]) -> HResult<()> {
    match indices.iter().find(|&&k| k >= dim) {
        Some(&index) => Err(HilbertError::IndexOutOfRange { index, dim }),
        None => Ok(()),
    }
}

/// Principal submatrix `m[indices[i], indices[j]]`.
///
/// This is a block extraction, not a change of basis: it only represents the
/// operator on the sector when `m` does not couple the sector to its
/// complement.
pub fn restrict_to_subspace(m: MatRef<'_, f64>, indices: &[usize]) -> HResult<Matrix> {
    if m.nrows() != m.ncols() {
        return Err(crate::error::DimensionError(m.nrows(), m.ncols()).into());
    }
    check_indices(m.nrows(), indices)?;
    let n = indices.len();
    Ok(Mat::from_fn(n, n, |i, j| m.read(indices[i], indices[j])))
}

/// Components of `v` at the given indices.
pub fn restrict_vector(v: &[f64], indices: &[usize]) -> HResult<Vec<f64>> {
    check_indices(v.len(), indices)?;
    Ok(indices.iter().map(|&k| v[k]).collect())
}
