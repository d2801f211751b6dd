//! Spectral time evolution.
//!
//! With `H v_j = λ_j v_j` and `g_j = ⟨v_j|ψ(0)⟩`,
//! `ψ(t)[k] = Σ_j exp(-i λ_j t) g_j v_j[k]` (ħ = 1, `i ∂ψ/∂t = H ψ`).

use crate::{diag::EigenSolution, C64, QResult};
use faer::MatRef;
use hilbert::error::DimensionError;

/// Overlaps `g = ψ0ᵀ V` of the initial state with every eigenvector.
pub fn grammian(psi0: &[f64], vectors: MatRef<'_, f64>) -> QResult<Vec<f64>> {
    DimensionError::check(psi0.len(), vectors.nrows())?;
    Ok((0..vectors.ncols())
        .map(|j| psi0.iter().enumerate().map(|(k, p)| p * vectors.read(k, j)).sum())
        .collect())
}

/// State at time `t` from a precomputed [`grammian`].
pub fn evolve(
    psi0: &[f64],
    t: f64,
    values: &[f64],
    vectors: MatRef<'_, f64>,
    g: &[f64],
) -> QResult<Vec<C64>> {
    DimensionError::check(psi0.len(), vectors.nrows())?;
    DimensionError::check(values.len(), vectors.ncols())?;
    DimensionError::check(g.len(), values.len())?;
    let phases: Vec<C64> = values
        .iter()
        .zip(g)
        .map(|(lambda, gj)| C64::from_polar(*gj, -lambda * t))
        .collect();
    Ok((0..vectors.nrows())
        .map(|k| {
            phases
                .iter()
                .enumerate()
                .map(|(j, ph)| *ph * vectors.read(k, j))
                .sum()
        })
        .collect())
}

/// Initial state bound to an eigen-solution, with its overlaps computed once.
#[derive(Clone, Debug)]
pub struct Propagator<'a> {
    eigen: &'a EigenSolution,
    psi0: Vec<f64>,
    grammian: Vec<f64>,
}

impl<'a> Propagator<'a> {
    pub fn new(eigen: &'a EigenSolution, psi0: Vec<f64>) -> QResult<Self> {
        let grammian = grammian(&psi0, eigen.vectors.as_ref())?;
        Ok(Self { eigen, psi0, grammian })
    }

    pub fn grammian(&self) -> &[f64] {
        &self.grammian
    }

    pub fn dim(&self) -> usize {
        self.psi0.len()
    }

    /// State at time `t`; see [`evolve`].
    pub fn state_at(&self, t: f64) -> QResult<Vec<C64>> {
        evolve(
            &self.psi0,
            t,
            &self.eigen.values,
            self.eigen.vectors.as_ref(),
            &self.grammian,
        )
    }
}
