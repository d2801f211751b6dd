//! Energy levels as a function of a uniform magnetic field.

use crate::{
    config::{Config, SimulationKind},
    error::SimResult,
    output::{RunResult, Series, Stopwatch, XY},
    sweep::Sweep,
};
use quantum::{diag::diagonalize, hamiltonian::hamiltonian, system::{BathSite, System}};
use std::f64::consts::PI;
use tracing::info;

/// Bath field step between consecutive sweep points.
pub const FIELD_STEP: f64 = 1e3;
/// Central field relative to the bath field.
pub const CENTRAL_FIELD_RATIO: f64 = 1.0002;
pub const BATH_DISTANCE: f64 = 1e3;

/// Bath particle `i` of `n` at polar-angle cosine `cos(i π / n)`.
pub fn spectrum_system(config: &Config) -> System {
    let physics = &config.physics;
    let n = physics.bath_count;
    let bath = (0..n)
        .map(|i| BathSite::new((i as f64 * PI / n as f64).cos(), BATH_DISTANCE))
        .collect();
    let system = System::new(bath, physics.spin, physics.moments(), physics.units);
    match physics.coefficients() {
        Some(c) => system.with_coefficients(c),
        None => system,
    }
}

pub fn spectrum(config: &Config) -> SimResult<RunResult> {
    let clock = Stopwatch::start();
    let system = spectrum_system(config);
    let solver = config.physics.eigen_solver;
    let fields: Vec<f64> = (0..config.physics.magnetic_field_range)
        .map(|i| i as f64 * FIELD_STEP)
        .collect();

    info!(
        points = fields.len(),
        particles = system.particles(),
        "diagonalizing along the field sweep"
    );
    let mut sweep = Sweep::new("spectrum", fields);
    let levels = sweep.run(|_, &b| {
        let h = hamiltonian(&system, CENTRAL_FIELD_RATIO * b, b)?;
        diagonalize(h.as_ref(), solver).map(|e| e.values)
    })?;

    let points = sweep
        .jobs()
        .iter()
        .zip(&levels)
        .flat_map(|(&b, values)| values.iter().map(move |&v| XY::new(b, v)))
        .collect();
    let system = system.with_interactions()?;
    Ok(clock.finish(
        SimulationKind::Spectrum,
        &config.files,
        Some(system),
        vec![Series::new("spectrum", points)],
    ))
}
