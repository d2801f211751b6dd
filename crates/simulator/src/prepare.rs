//! Building the model inputs of a run from its configuration.

use crate::{config::PhysicsConfig, error::{SimError, SimResult}};
use hilbert::{
    many_body::{down_count, many_body_vector},
    sector::{basis_indices, restrict_vector},
    spin,
};
use quantum::{observables::Observable, system::{BathSite, System}};
use tracing::{debug, warn};

/// System of `bath_count` bath particles placed by the configured geometry at
/// `constant_distance` (or on the field axis' equator when no geometry is
/// given), with explicit coefficients when configured.
pub fn build_system(physics: &PhysicsConfig, bath_count: usize, tilt: f64) -> SimResult<System> {
    let bath = match physics.geometry()? {
        Some(g) => g.bath_sites(bath_count, tilt, physics.constant_distance),
        None => vec![BathSite::new(0.0, physics.constant_distance); bath_count],
    };
    let system = System::new(bath, physics.spin, physics.moments(), physics.units);
    Ok(match physics.coefficients() {
        Some(c) => system.with_coefficients(c),
        None => system,
    })
}

/// Bath size implied by explicit coefficients (index 0 is the central spin).
pub fn coefficient_bath_count(physics: &PhysicsConfig) -> SimResult<usize> {
    match physics.interaction_coefficients.len() {
        0 => Err(SimError::MissingField { section: "physics", field: "interaction_coefficients" }),
        n => Ok(n - 1),
    }
}

/// Fixed-magnetization sector of `ket`, if one applies.
///
/// Only kets made solely of `u` and `d` lie in a single sector; any `p` or
/// `m` spreads the state over several, so it stays in the full space. Beyond
/// that, only spin-1/2 chains with at least one down spin and a sector of two
/// or more states are restricted.
pub fn sector_for(ket: &str, spin: f64) -> SimResult<Option<Vec<usize>>> {
    let down = down_count(ket);
    if spin != 0.5 || down == 0 {
        return Ok(None);
    }
    if !ket.chars().all(|c| c == 'u' || c == 'd') {
        debug!(ket, "superposition ket spans several sectors; staying in the full space");
        return Ok(None);
    }
    let indices = basis_indices(ket.chars().count(), down)?;
    if indices.len() < 2 {
        debug!(ket, "sector has a single state; staying in the full space");
        return Ok(None);
    }
    Ok(Some(indices))
}

/// Initial product state, restricted to `sector` when given.
pub fn initial_state(ket: &str, spin: f64, sector: Option<&[usize]>) -> SimResult<Vec<f64>> {
    let full = many_body_vector(ket, spin::dim(spin)?)?;
    Ok(match sector {
        Some(indices) => {
            let restricted = restrict_vector(&full, indices)?;
            debug!(from = full.len(), to = restricted.len(), "reduced the dimension");
            restricted
        }
        None => full,
    })
}

/// Configured observables; those whose slot is not a particle are skipped.
pub fn observables(
    physics: &PhysicsConfig,
    particles: usize,
    sector: Option<&[usize]>,
) -> SimResult<Vec<Observable>> {
    let mut out = Vec::with_capacity(physics.observables.len());
    for obs in &physics.observables {
        let op = obs.operator()?;
        if obs.slot >= particles {
            warn!(
                operator = %obs.operator,
                slot = obs.slot,
                particles,
                "observable slot out of range; skipped"
            );
            continue;
        }
        out.push(Observable::from_operator(op, physics.spin, obs.slot, particles, sector)?);
    }
    Ok(out)
}
