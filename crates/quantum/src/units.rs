//! Unit systems for the dipole-dipole coupling constant.

use crate::error::QuantumError;
use serde::{Deserialize, Serialize};
use std::{f64::consts::PI, str::FromStr};

/// Vacuum permittivity in SI units.
pub const VACUUM_PERMITTIVITY: f64 = 8.854e-12;

/// Coupling constant in atomic units.
pub const ATOMIC_COUPLING: f64 = 149.42785955012954;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    #[default]
    #[serde(rename = "SI", alias = "si", alias = "")]
    Si,
    #[serde(rename = "atomic")]
    Atomic,
}

impl Units {
    /// Prefactor `k` of `k μ_b μ_a / r³`.
    pub fn coupling_constant(self) -> f64 {
        match self {
            Self::Si => 1.0 / (4.0 * PI * VACUUM_PERMITTIVITY),
            Self::Atomic => ATOMIC_COUPLING,
        }
    }
}

impl FromStr for Units {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "SI" | "si" => Ok(Self::Si),
            "atomic" => Ok(Self::Atomic),
            other => Err(QuantumError::UnknownUnits(other.to_string())),
        }
    }
}
