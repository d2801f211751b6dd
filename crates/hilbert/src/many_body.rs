//! Embedding of single-particle operators and product states into the
//! tensor-product space of `n` identical particles.

use crate::{error::HilbertError, matrix::{kron, kron_vec}, HResult, Matrix};
use faer::Mat;
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::debug;

/// `Id ⊗ ... ⊗ op ⊗ ... ⊗ Id` with `op` at position `slot` among `particles`
/// factors, each of dimension `op.nrows()`.
///
/// A `slot` outside `0..particles` is a no-op and returns `op` itself.
pub fn many_body_operator(op: &Matrix, slot: usize, particles: usize) -> Matrix {
    if slot >= particles {
        debug!(slot, particles, "slot outside the particle range; operator left unembedded");
        return op.clone();
    }
    let d = op.nrows();
    let left = d.pow(slot as u32);
    let right = d.pow((particles - slot - 1) as u32);
    let mut out = op.clone();
    if left > 1 {
        out = kron(Mat::<f64>::identity(left, left).as_ref(), out.as_ref());
    }
    if right > 1 {
        out = kron(out.as_ref(), Mat::<f64>::identity(right, right).as_ref());
    }
    out
}

fn single_particle(ch: char, dim: usize, spec: &str) -> HResult<Vec<f64>> {
    let (a, b) = match ch {
        'u' => (1.0, 0.0),
        'd' => (0.0, 1.0),
        'p' => (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        'm' => (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        _ => return Err(HilbertError::InvalidStateSpec { ch, spec: spec.to_string() }),
    };
    let mut v = vec![0.0; dim];
    v[0] = a;
    v[1] = b;
    Ok(v)
}

/// Product state described by `spec`, one character per particle, leftmost
/// particle most significant.
///
/// `u` and `d` select the first two single-particle basis vectors; `p` and
/// `m` their symmetric and antisymmetric superpositions. Higher levels of a
/// `dim > 2` particle are left unpopulated.
pub fn many_body_vector(spec: &str, dim: usize) -> HResult<Vec<f64>> {
    if dim < 2 {
        return Err(HilbertError::BadSingleParticleDim(dim));
    }
    let mut out = vec![1.0];
    for ch in spec.chars() {
        let v = single_particle(ch, dim, spec)?;
        out = kron_vec(&out, &v);
    }
    Ok(out)
}

/// Number of `d` characters in a state specification.
pub fn down_count(spec: &str) -> usize {
    spec.chars().filter(|&c| c == 'd').count()
}
