//! Run configuration, read from one or more YAML files.
//!
//! Later files override earlier ones key by key; nested mappings are merged
//! rather than replaced. Keys are snake_case, and the flat lowercase spelling
//! (`bathdipolemoment`, `outputsdir`, ...) is accepted as an alias.

use crate::error::{SimError, SimResult};
use hilbert::spin::SpinOperator;
use quantum::{
    diag::EigenSolver,
    error::QuantumError,
    geometry::Geometry,
    system::DipoleMoments,
    units::Units,
};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::{fs, path::{Path, PathBuf}};
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationKind {
    SpinEvolution,
    SpinEvolutionSelectedCoeffs,
    Spectrum,
    Interactions,
    SpreadOfCouplings,
    SpreadOfCouplingsSelectedCoeffs,
    DecayTime,
    FindGeometryGivenInteractions,
}

impl SimulationKind {
    /// Identifier as written in configuration files.
    pub fn id(self) -> &'static str {
        match self {
            Self::SpinEvolution => "spin-evolution",
            Self::SpinEvolutionSelectedCoeffs => "spin-evolution-selected-coeffs",
            Self::Spectrum => "spectrum",
            Self::Interactions => "interactions",
            Self::SpreadOfCouplings => "spread-of-couplings",
            Self::SpreadOfCouplingsSelectedCoeffs => "spread-of-couplings-selected-coeffs",
            Self::DecayTime => "decay-time",
            Self::FindGeometryGivenInteractions => "find-geometry-given-interactions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SpinEvolution => "Central spin expectation value time evolution",
            Self::SpinEvolutionSelectedCoeffs =>
                "Central spin expectation value time evolution for selected coefficients",
            Self::Spectrum => "Spectrum vs. magnetic field",
            Self::Interactions => "Interaction strength",
            Self::SpreadOfCouplings => "Spread of couplings vs tilt angle",
            Self::SpreadOfCouplingsSelectedCoeffs =>
                "Spread of couplings vs tilt angle for selected coefficients",
            Self::DecayTime => "Decay time vs tilt angle",
            Self::FindGeometryGivenInteractions => "Geometry for specified interactions",
        }
    }

    /// Physics fields that must be non-zero / non-empty for this simulation.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::SpinEvolution => &[
                "bath_dipole_moment", "atom_dipole_moment", "spin", "constant_distance",
                "geometry", "time_range", "dt", "initial_ket", "observables",
            ],
            Self::SpinEvolutionSelectedCoeffs => &[
                "spin", "interaction_coefficients", "time_range", "dt", "initial_ket",
                "observables",
            ],
            Self::Spectrum => &[
                "bath_dipole_moment", "atom_dipole_moment", "bath_count", "spin",
                "magnetic_field_range",
            ],
            Self::Interactions => &[
                "bath_dipole_moment", "atom_dipole_moment", "bath_count", "constant_distance",
                "spin", "geometry",
            ],
            Self::SpreadOfCouplings | Self::DecayTime => &[
                "bath_dipole_moment", "atom_dipole_moment", "bath_count", "spin",
                "tilt_angle_range", "constant_distance", "geometry", "dt",
            ],
            Self::SpreadOfCouplingsSelectedCoeffs => &[
                "spin", "interaction_coefficients", "tilt_angle_range", "dt",
            ],
            Self::FindGeometryGivenInteractions => &[
                "bath_dipole_moment", "atom_dipole_moment", "spin", "interaction_coefficients",
            ],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservableConfig {
    /// `Sz`, `Sp`, `Sm` or `Id`.
    pub operator: String,
    pub slot: usize,
}

impl ObservableConfig {
    pub fn operator(&self) -> SimResult<SpinOperator> {
        self.operator.parse()
            .map_err(|_| QuantumError::UnknownOperator(self.operator.clone()).into())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    #[serde(alias = "bathdipolemoment")]
    pub bath_dipole_moment: f64,
    #[serde(alias = "atomdipolemoment")]
    pub atom_dipole_moment: f64,
    #[serde(alias = "bathcount")]
    pub bath_count: usize,
    pub spin: f64,
    /// In units of π.
    #[serde(alias = "tiltangle")]
    pub tilt_angle: f64,
    /// `[min, max]` in units of π.
    #[serde(alias = "tiltanglerange")]
    pub tilt_angle_range: Vec<f64>,
    #[serde(alias = "constantdistance")]
    pub constant_distance: f64,
    pub geometry: String,
    #[serde(alias = "interactioncoefficients")]
    pub interaction_coefficients: Vec<f64>,
    #[serde(alias = "bathmagneticfield")]
    pub bath_magnetic_field: f64,
    #[serde(alias = "centralmagneticfield")]
    pub central_magnetic_field: f64,
    #[serde(alias = "timerange")]
    pub time_range: usize,
    /// Time step of an evolution; for tilt sweeps, the tilt step in units of π.
    pub dt: f64,
    #[serde(alias = "initialket")]
    pub initial_ket: String,
    pub observables: Vec<ObservableConfig>,
    #[serde(alias = "magneticfieldrange")]
    pub magnetic_field_range: usize,
    pub units: Units,
    #[serde(alias = "eigensolver")]
    pub eigen_solver: EigenSolver,
}

impl PhysicsConfig {
    pub fn moments(&self) -> DipoleMoments {
        DipoleMoments { bath: self.bath_dipole_moment, atom: self.atom_dipole_moment }
    }

    /// `None` when no geometry is configured.
    pub fn geometry(&self) -> SimResult<Option<Geometry>> {
        if self.geometry.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.geometry.parse()?))
    }

    /// `(min, max)` of the tilt sweep.
    pub fn tilt_range(&self) -> SimResult<(f64, f64)> {
        match self.tilt_angle_range[..] {
            [min, max] => Ok((min, max)),
            _ => Err(SimError::Config(format!(
                "tilt_angle_range should be [min, max]; got {} values", self.tilt_angle_range.len(),
            ))),
        }
    }

    pub fn coefficients(&self) -> Option<Vec<f64>> {
        (!self.interaction_coefficients.is_empty()).then(|| self.interaction_coefficients.clone())
    }

    fn is_set(&self, field: &str) -> bool {
        match field {
            "bath_dipole_moment" => self.bath_dipole_moment != 0.0,
            "atom_dipole_moment" => self.atom_dipole_moment != 0.0,
            "bath_count" => self.bath_count != 0,
            "spin" => self.spin != 0.0,
            "tilt_angle" => self.tilt_angle != 0.0,
            "tilt_angle_range" => !self.tilt_angle_range.is_empty(),
            "constant_distance" => self.constant_distance != 0.0,
            "geometry" => !self.geometry.is_empty(),
            "interaction_coefficients" => !self.interaction_coefficients.is_empty(),
            "bath_magnetic_field" => self.bath_magnetic_field != 0.0,
            "central_magnetic_field" => self.central_magnetic_field != 0.0,
            "time_range" => self.time_range != 0,
            "dt" => self.dt != 0.0,
            "initial_ket" => !self.initial_ket.is_empty(),
            "observables" => !self.observables.is_empty(),
            "magnetic_field_range" => self.magnetic_field_range != 0,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsConfig {
    pub cpu: String,
    pub ram: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    #[serde(alias = "outputsdir")]
    pub outputs_dir: PathBuf,
    /// Eigen-solution to load instead of diagonalizing.
    #[serde(alias = "diagonalizationpath", alias = "diagonalizationdir")]
    pub diagonalization_path: Option<PathBuf>,
    pub results: ResultsConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: Option<SimulationKind>,
    /// `debug` for more output.
    pub verbosity: String,
    pub physics: PhysicsConfig,
    pub files: FilesConfig,
}

// `over` wins on conflicts; mappings merge recursively
fn merge(base: &mut Value, over: Value) {
    match (base, over) {
        (Value::Mapping(base), Value::Mapping(over)) => {
            for (k, v) in over {
                match base.get_mut(&k) {
                    Some(slot) => merge(slot, v),
                    None => {
                        base.insert(k, v);
                    }
                }
            }
        }
        (base, over) => {
            *base = over;
        }
    }
}

impl Config {
    /// Parse a single YAML document.
    pub fn from_yaml(src: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(src)?)
    }

    /// Merge the given files in order and parse the result.
    pub fn load<P>(paths: &[P]) -> SimResult<Self>
    where
        P: AsRef<Path>,
    {
        let mut merged = Value::Mapping(Mapping::new());
        for path in paths {
            let path = path.as_ref();
            debug!(path = %path.display(), "merging config");
            let text = fs::read_to_string(path)?;
            let value: Value = serde_yaml::from_str(&text)?;
            if !value.is_null() {
                merge(&mut merged, value);
            }
        }
        Ok(serde_yaml::from_value(merged)?)
    }

    pub fn is_debug(&self) -> bool {
        self.verbosity == "debug"
    }

    /// Check that a simulation is selected and that every field it needs
    /// is present.
    pub fn validate(&self) -> SimResult<SimulationKind> {
        let kind = self.simulation
            .ok_or(SimError::MissingField { section: "config", field: "simulation" })?;
        if self.files.outputs_dir.as_os_str().is_empty() {
            return Err(SimError::MissingField { section: "files", field: "outputs_dir" });
        }
        for &field in kind.required_fields() {
            if !self.physics.is_set(field) {
                return Err(SimError::MissingField { section: "physics", field });
            }
        }
        Ok(kind)
    }
}
