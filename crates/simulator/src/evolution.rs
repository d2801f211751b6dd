//! Expectation values of the configured observables along the time
//! evolution of a product state.

use crate::{
    config::{Config, SimulationKind},
    error::{SimError, SimResult},
    output::{RunResult, Series, Stopwatch, XY},
    prepare::{build_system, initial_state, observables, sector_for},
    sweep::Sweep,
};
use hilbert::error::DimensionError;
use quantum::{
    diag::diagonalize,
    evolution::Propagator,
    hamiltonian::{hamiltonian, hamiltonian_in_base},
    results_io::{load_eigen, save_eigen},
};
use std::f64::consts::PI;
use tracing::{debug, info};

pub fn spin_time_evolution(config: &Config, kind: SimulationKind) -> SimResult<RunResult> {
    let clock = Stopwatch::start();
    let physics = &config.physics;
    let ket = physics.initial_ket.as_str();
    let particles = ket.chars().count();
    if particles < 2 {
        return Err(SimError::Config(format!(
            "initial_ket {ket:?} needs a central and a bath particle"
        )));
    }

    debug!("calculating initial states");
    let system = build_system(physics, particles - 1, physics.tilt_angle)?;
    let sector = sector_for(ket, physics.spin)?;
    let psi0 = initial_state(ket, physics.spin, sector.as_deref())?;
    let observables = observables(physics, particles, sector.as_deref())?;

    let (b0, b) = (physics.central_magnetic_field, physics.bath_magnetic_field);
    let eigen = match &config.files.diagonalization_path {
        Some(path) => {
            info!(path = %path.display(), "loading diagonalization results");
            load_eigen(path)?
        }
        None => {
            info!(dim = psi0.len(), "diagonalizing");
            let h = match &sector {
                Some(indices) => hamiltonian_in_base(&system, b0, b, indices)?,
                None => hamiltonian(&system, b0, b)?,
            };
            let eigen = diagonalize(h.as_ref(), physics.eigen_solver)?;
            std::fs::create_dir_all(&config.files.outputs_dir)?;
            let path = config.files.outputs_dir.join(format!("diag-{}.yaml", clock.stamp()));
            save_eigen(&path, &eigen, &system)?;
            eigen
        }
    };
    DimensionError::check(eigen.dim(), psi0.len()).map_err(hilbert::error::HilbertError::from)?;

    debug!("calculating the inner product matrix");
    let propagator = Propagator::new(&eigen, psi0)?;

    debug!("calculating time evolution");
    let times: Vec<f64> = (0..physics.time_range).map(|k| physics.dt * k as f64).collect();
    let mut series = Vec::with_capacity(observables.len());
    for observable in &observables {
        let mut sweep = Sweep::new("time evolution", times.clone());
        let values = sweep.run(|_, &t| {
            let v = observable.expectation_value(&propagator.state_at(t)?);
            debug!(t, observable = %observable.name, "evaluated");
            v
        })?;
        let points = times
            .iter()
            .zip(values)
            .map(|(&t, v)| XY::new(t / (2.0 * PI), v))
            .collect();
        series.push(Series::new(observable.name.clone(), points));
    }

    debug!("wrapping up");
    let system = system.with_interactions()?;
    Ok(clock.finish(kind, &config.files, Some(system), series))
}
