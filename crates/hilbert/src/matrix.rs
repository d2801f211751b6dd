//! Dense matrix helpers shared by the operator builders.

use crate::{error::DimensionError, Matrix};
use faer::{Mat, MatRef};

/// Kronecker product `a ⊗ b`.
pub fn kron(a: MatRef<'_, f64>, b: MatRef<'_, f64>) -> Matrix {
    let br = b.nrows();
    let bc = b.ncols();
    Mat::from_fn(a.nrows() * br, a.ncols() * bc, |i, j| {
        a.read(i / br, j / bc) * b.read(i % br, j % bc)
    })
}

/// Kronecker product of two vectors, first factor most significant.
pub fn kron_vec(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter()
        .flat_map(|ai| b.iter().map(move |bk| ai * bk))
        .collect()
}

/// Build a matrix from row-major data.
///
/// *Panics if `data.len() != nrows * ncols`*.
pub fn from_row_major(nrows: usize, ncols: usize, data: &[f64]) -> Matrix {
    assert_eq!(data.len(), nrows * ncols, "row-major data has the wrong length");
    Mat::from_fn(nrows, ncols, |i, j| data[i * ncols + j])
}

/// Flatten a matrix to row-major data.
pub fn to_row_major(m: MatRef<'_, f64>) -> Vec<f64> {
    let mut out = Vec::with_capacity(m.nrows() * m.ncols());
    for i in 0..m.nrows() {
        for j in 0..m.ncols() {
            out.push(m.read(i, j));
        }
    }
    out
}

/// `h += f * term`, in place.
pub fn add_scaled(h: &mut Matrix, f: f64, term: MatRef<'_, f64>) -> Result<(), DimensionError> {
    DimensionError::check(h.nrows(), term.nrows())?;
    DimensionError::check(h.ncols(), term.ncols())?;
    for j in 0..h.ncols() {
        for i in 0..h.nrows() {
            let v = h.read(i, j) + f * term.read(i, j);
            h.write(i, j, v);
        }
    }
    Ok(())
}

/// Dense matrix-vector product `m · v`.
pub fn mat_vec(m: MatRef<'_, f64>, v: &[f64]) -> Result<Vec<f64>, DimensionError> {
    DimensionError::check(m.ncols(), v.len())?;
    Ok((0..m.nrows())
        .map(|i| v.iter().enumerate().map(|(j, vj)| m.read(i, j) * vj).sum())
        .collect())
}

/// Largest `|m[i, j] - m[j, i]|`; infinite for non-square input.
pub fn max_asymmetry(m: MatRef<'_, f64>) -> f64 {
    if m.nrows() != m.ncols() {
        return f64::INFINITY;
    }
    let n = m.nrows();
    let mut dev: f64 = 0.0;
    for i in 0..n {
        for j in i + 1..n {
            dev = dev.max((m.read(i, j) - m.read(j, i)).abs());
        }
    }
    dev
}

/// Element-wise comparison within an absolute tolerance.
pub fn approx_eq(a: MatRef<'_, f64>, b: MatRef<'_, f64>, tol: f64) -> bool {
    if a.nrows() != b.nrows() || a.ncols() != b.ncols() {
        return false;
    }
    (0..a.nrows()).all(|i| {
        (0..a.ncols()).all(|j| (a.read(i, j) - b.read(i, j)).abs() <= tol)
    })
}
