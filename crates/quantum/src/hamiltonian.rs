//! Flip-flop (XX) central-spin Hamiltonian with Zeeman terms:
//!
//! `H = Σ_j J_j (S+_0 S-_j + S-_0 S+_j) + b0 Sz_0 + b Σ_{j≥1} Sz_j`

use crate::{error::QuantumError, system::System, QResult};
use hilbert::{
    many_body::many_body_operator,
    matrix::{add_scaled, max_asymmetry},
    sector::restrict_to_subspace,
    spin::{sm, sp, sz},
    Matrix,
};
use tracing::debug;

/// Largest tolerated `|H - H^T|` entry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-8;

// S+_0 S-_j + S-_0 S+_j, unscaled
fn exchange(system: &System, j: usize) -> QResult<Matrix> {
    let n = system.particles();
    let p = sp(system.spin)?;
    let m = sm(system.spin)?;
    let forward = &many_body_operator(&p, 0, n) * &many_body_operator(&m, j, n);
    let backward = &many_body_operator(&m, 0, n) * &many_body_operator(&p, j, n);
    Ok(&forward + &backward)
}

/// `J_j (S+_0 S-_j + S-_0 S+_j)` for particle `j`.
pub fn flip_flop_term(system: &System, j: usize) -> QResult<Matrix> {
    let f = system.interaction_at(j)?;
    let term = exchange(system, j)?;
    Ok(Matrix::from_fn(term.nrows(), term.ncols(), |r, c| f * term.read(r, c)))
}

/// `b0 Sz_0 + b Σ_{j≥1} Sz_j`.
pub fn zeeman_term(system: &System, b0: f64, b: f64) -> QResult<Matrix> {
    let n = system.particles();
    let z = sz(system.spin)?;
    let d = system.dim()?;
    let mut h = Matrix::zeros(d, d);
    add_scaled(&mut h, b0, many_body_operator(&z, 0, n).as_ref())?;
    for j in 1..n {
        add_scaled(&mut h, b, many_body_operator(&z, j, n).as_ref())?;
    }
    Ok(h)
}

/// Full Hamiltonian on the `d^(N+1)`-dimensional space.
///
/// Fails with [`QuantumError::AsymmetricHamiltonian`] if the assembled matrix
/// is not symmetric within [`SYMMETRY_TOLERANCE`].
pub fn hamiltonian(system: &System, b0: f64, b: f64) -> QResult<Matrix> {
    let couplings = system.compute_interactions()?;
    debug!(particles = system.particles(), b0, b, "assembling hamiltonian");
    let mut h = zeeman_term(system, b0, b)?;
    for (j, &f) in couplings.iter().enumerate() {
        if f == 0.0 {
            continue;
        }
        add_scaled(&mut h, f, exchange(system, j)?.as_ref())?;
    }
    let max_deviation = max_asymmetry(h.as_ref());
    if max_deviation > SYMMETRY_TOLERANCE {
        return Err(QuantumError::AsymmetricHamiltonian { max_deviation });
    }
    Ok(h)
}

/// Hamiltonian restricted to the basis states `indices`.
///
/// The restriction is a principal-submatrix extraction; it is exact because
/// `H` conserves total `Sz` and `indices` is a fixed-magnetization sector.
pub fn hamiltonian_in_base(system: &System, b0: f64, b: f64, indices: &[usize]) -> QResult<Matrix> {
    if indices.len() < 2 {
        return Err(QuantumError::SectorTooSmall(indices.len()));
    }
    let full = hamiltonian(system, b0, b)?;
    debug!(from = full.nrows(), to = indices.len(), "restricting hamiltonian to sector");
    Ok(restrict_to_subspace(full.as_ref(), indices)?)
}
