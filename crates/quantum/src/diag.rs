//! Exact diagonalization of real symmetric Hamiltonians.

use crate::QResult;
use faer::{MatRef, Side};
use hilbert::{error::DimensionError, Matrix};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tolerance of the eigen-relation and determinant checks.
pub const EIGEN_TOLERANCE: f64 = 1e-8;

/// Eigenvalues closer than this are treated as one degenerate cluster.
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;

/// Eigenvalues paired column-wise with eigenvectors.
#[derive(Clone, Debug)]
pub struct EigenSolution {
    pub values: Vec<f64>,
    /// `dim x dim`, one eigenvector per column.
    pub vectors: Matrix,
}

impl EigenSolution {
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Column `i` of the eigenvector matrix.
    pub fn vector(&self, i: usize) -> Vec<f64> {
        (0..self.vectors.nrows()).map(|k| self.vectors.read(k, i)).collect()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EigenSolver {
    /// Self-adjoint solver; eigenvectors come out orthonormal.
    #[default]
    Symmetric,
    /// Self-adjoint solver followed by sorting and an explicit Gram-Schmidt
    /// pass over every degenerate cluster.
    General,
}

/// Outcome of the post-diagonalization check.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DiagnosticReport {
    /// Largest `max_k |(H v_i - λ_i v_i)[k]|` over all eigenpairs.
    pub max_residual: f64,
    /// Eigenpair attaining `max_residual`.
    pub worst_pair: usize,
    pub determinant: f64,
}

impl DiagnosticReport {
    pub fn is_ok(&self) -> bool {
        self.max_residual <= EIGEN_TOLERANCE
            && (self.determinant.abs() - 1.0).abs() <= EIGEN_TOLERANCE
    }
}

/// Check `H v_i = λ_i v_i` for every eigenpair and `|det V| = 1`.
pub fn check_eigen_relation(
    h: MatRef<'_, f64>,
    eigen: &EigenSolution,
) -> QResult<DiagnosticReport> {
    DimensionError::check(h.ncols(), eigen.vectors.nrows())?;
    DimensionError::check(eigen.values.len(), eigen.vectors.ncols())?;
    let hv = h * eigen.vectors.as_ref();
    let mut report = DiagnosticReport::default();
    for (i, &lambda) in eigen.values.iter().enumerate() {
        for k in 0..hv.nrows() {
            let r = (hv.read(k, i) - lambda * eigen.vectors.read(k, i)).abs();
            if r > report.max_residual {
                report.max_residual = r;
                report.worst_pair = i;
            }
        }
    }
    report.determinant = eigen.vectors.as_ref().determinant();
    Ok(report)
}

/// Modified Gram-Schmidt over each run of columns whose eigenvalues agree
/// within `tol`. `values` must be sorted.
pub fn orthonormalize_degenerate(values: &[f64], vectors: &mut Matrix, tol: f64) {
    let n = vectors.nrows();
    let mut start = 0;
    while start < values.len() {
        let mut end = start + 1;
        while end < values.len() && (values[end] - values[end - 1]).abs() < tol {
            end += 1;
        }
        for c in start..end {
            for prev in start..c {
                let dot: f64 = (0..n).map(|k| vectors.read(k, c) * vectors.read(k, prev)).sum();
                for k in 0..n {
                    let v = vectors.read(k, c) - dot * vectors.read(k, prev);
                    vectors.write(k, c, v);
                }
            }
            let norm = (0..n).map(|k| vectors.read(k, c).powi(2)).sum::<f64>().sqrt();
            if norm > 0.0 {
                for k in 0..n {
                    let v = vectors.read(k, c) / norm;
                    vectors.write(k, c, v);
                }
            }
        }
        if end - start > 1 {
            debug!(
                eigenvalue = values[start],
                multiplicity = end - start,
                "orthonormalized degenerate cluster"
            );
        }
        start = end;
    }
}

/// Full eigendecomposition of the symmetric matrix `h`.
///
/// The eigen-relation check is advisory: a failure is logged, never returned.
pub fn diagonalize(h: MatRef<'_, f64>, solver: EigenSolver) -> QResult<EigenSolution> {
    DimensionError::check(h.nrows(), h.ncols())?;
    debug!(dim = h.nrows(), ?solver, "diagonalizing");
    let eig = h.selfadjoint_eigendecomposition(Side::Lower);
    let s = eig.s().column_vector();
    let mut values: Vec<f64> = (0..h.nrows()).map(|i| s.read(i)).collect();
    let mut vectors = eig.u().to_owned();

    if solver == EigenSolver::General {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let sorted =
            Matrix::from_fn(vectors.nrows(), vectors.ncols(), |k, c| vectors.read(k, order[c]));
        values = order.iter().map(|&i| values[i]).collect();
        vectors = sorted;
        orthonormalize_degenerate(&values, &mut vectors, DEGENERACY_TOLERANCE);
    }

    let eigen = EigenSolution { values, vectors };
    let report = check_eigen_relation(h, &eigen)?;
    if !report.is_ok() {
        warn!(
            max_residual = report.max_residual,
            worst_pair = report.worst_pair,
            determinant = report.determinant,
            "eigen-relation check failed",
        );
    }
    Ok(eigen)
}
