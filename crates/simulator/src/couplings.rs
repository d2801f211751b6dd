//! Coupling-strength studies: the coupling table, its spread and the
//! resulting decay time as the bath is tilted, and the inverse problem of
//! placing bath particles for prescribed couplings.

use crate::{
    config::{Config, SimulationKind},
    error::{SimError, SimResult},
    output::{RunResult, Series, Stopwatch, XY},
    prepare::{build_system, coefficient_bath_count},
    sweep::Sweep,
};
use quantum::system::spread;
use tracing::info;

/// Couplings are reported in units of 10³.
pub const COUPLING_SCALE: f64 = 1e-3;
/// Spreads below this are treated as zero.
pub const SPREAD_FLOOR: f64 = 1e-8;

/// Bath couplings sorted from strongest to weakest.
pub fn interactions(config: &Config) -> SimResult<RunResult> {
    let clock = Stopwatch::start();
    let physics = &config.physics;
    let system = build_system(physics, physics.bath_count, physics.tilt_angle)?;
    let mut couplings = system.compute_interactions()?.split_off(1);
    couplings.sort_by(|a, b| b.total_cmp(a));
    info!(?couplings, "interaction strengths");

    let points = couplings
        .iter()
        .enumerate()
        .map(|(j, &c)| XY::new(j as f64, c * COUPLING_SCALE))
        .collect();
    let system = system.with_interactions()?;
    Ok(clock.finish(
        SimulationKind::Interactions,
        &config.files,
        Some(system),
        vec![Series::new("interactions", points)],
    ))
}

/// Decay time `1 / (spread · 10⁻³)` with the spread floored at
/// [`SPREAD_FLOOR`].
pub fn decay_time_of(spread: f64) -> f64 {
    1.0 / (spread.max(SPREAD_FLOOR) * COUPLING_SCALE)
}

/// Tilt angles `min, min + dt, ...` below `max`, in units of π.
pub fn tilt_angles(min: f64, max: f64, dt: f64) -> SimResult<Vec<f64>> {
    if !(dt > 0.0) {
        return Err(SimError::Config(format!("dt must be positive for a tilt sweep; got {dt}")));
    }
    let steps = ((max - min) / dt).ceil().max(0.0) as usize;
    Ok((0..steps).map(|k| min + dt * k as f64).filter(|&t| t < max).collect())
}

fn tilt_sweep<F>(config: &Config, kind: SimulationKind, y: F) -> SimResult<RunResult>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    let clock = Stopwatch::start();
    let physics = &config.physics;
    let bath_count = match kind {
        SimulationKind::SpreadOfCouplingsSelectedCoeffs => coefficient_bath_count(physics)?,
        _ => physics.bath_count,
    };
    let (min, max) = physics.tilt_range()?;
    let mut sweep = Sweep::new("tilt angle", tilt_angles(min, max, physics.dt)?);
    let spreads = sweep.run(|_, &tilt| -> SimResult<f64> {
        let couplings = build_system(physics, bath_count, tilt)?.compute_interactions()?;
        Ok(spread(&couplings[1..]))
    })?;

    let points = sweep
        .jobs()
        .iter()
        .zip(spreads)
        .map(|(&tilt, s)| XY::new(tilt, y(s)))
        .collect();
    let system = build_system(physics, bath_count, min)?;
    Ok(clock.finish(kind, &config.files, Some(system), vec![Series::new(kind.id(), points)]))
}

/// Spread of bath couplings as the bath is tilted.
pub fn spread_of_couplings(config: &Config, kind: SimulationKind) -> SimResult<RunResult> {
    tilt_sweep(config, kind, |s| if s < SPREAD_FLOOR { 0.0 } else { s * COUPLING_SCALE })
}

pub fn decay_time(config: &Config) -> SimResult<RunResult> {
    tilt_sweep(config, SimulationKind::DecayTime, decay_time_of)
}

/// Distances at which each bath particle attains its prescribed coupling.
pub fn find_geometry(config: &Config) -> SimResult<RunResult> {
    let clock = Stopwatch::start();
    let physics = &config.physics;
    let bath_count = coefficient_bath_count(physics)?;
    let mut system = build_system(physics, bath_count, physics.tilt_angle)?;

    info!(bath_count, "calculating distances for the given interactions");
    let mut points = Vec::with_capacity(bath_count);
    for j in 1..=bath_count {
        let strength = system.interaction_at(j)?;
        let distance = system.distance_for_interaction(j, strength)?;
        let site = &mut system.bath[j - 1];
        site.distance = distance;
        site.interaction_strength = strength;
        points.push(XY::new(j as f64, distance));
    }
    Ok(clock.finish(
        SimulationKind::FindGeometryGivenInteractions,
        &config.files,
        Some(system),
        vec![Series::new("distances", points)],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilt_angles_exclude_the_upper_bound() {
        let t = tilt_angles(0.0, 0.5, 0.25).unwrap();
        assert_eq!(t, vec![0.0, 0.25]);
        assert!(tilt_angles(0.0, 1.0, 0.0).is_err());
        assert!(tilt_angles(1.0, 0.0, 0.1).unwrap().is_empty());
    }

    #[test]
    fn decay_time_is_bounded() {
        assert!((decay_time_of(0.0) - 1e11).abs() < 1.0);
        assert!((decay_time_of(2.0) - 500.0).abs() < 1e-9);
    }
}
