//! Simulation drivers for the central-spin model.
//!
//! Each [`SimulationKind`] maps to one driver; [`run`] validates the
//! configuration and dispatches. Drivers fan their independent jobs out
//! through [`sweep::Sweep`] and return a [`RunResult`] for the caller to
//! write.

pub mod config;
pub mod couplings;
pub mod error;
pub mod evolution;
pub mod output;
pub mod prepare;
pub mod spectrum;
pub mod sweep;

use std::path::PathBuf;
use tracing::info;

pub use config::{Config, SimulationKind};
pub use error::{SimError, SimResult};
pub use output::RunResult;

/// Validate `config` and run the simulation it selects.
pub fn run(config: &Config) -> SimResult<RunResult> {
    let kind = config.validate()?;
    info!(simulation = kind.id(), "starting the simulation: {}", kind.title());
    match kind {
        SimulationKind::SpinEvolution | SimulationKind::SpinEvolutionSelectedCoeffs =>
            evolution::spin_time_evolution(config, kind),
        SimulationKind::Spectrum => spectrum::spectrum(config),
        SimulationKind::Interactions => couplings::interactions(config),
        SimulationKind::SpreadOfCouplings | SimulationKind::SpreadOfCouplingsSelectedCoeffs =>
            couplings::spread_of_couplings(config, kind),
        SimulationKind::DecayTime => couplings::decay_time(config),
        SimulationKind::FindGeometryGivenInteractions => couplings::find_geometry(config),
    }
}

/// [`run`], then write the result under `files.outputs_dir`.
pub fn run_and_write(config: &Config) -> SimResult<PathBuf> {
    run(config)?.write(&config.files.outputs_dir)
}
