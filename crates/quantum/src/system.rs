//! Central spin plus bath: geometry, dipole moments and the pairwise couplings
//! derived from them.

use crate::{error::QuantumError, units::Units, QResult};
use serde::{Deserialize, Serialize};

/// One particle's position relative to the central spin.
///
/// `angle` holds the cosine of the polar angle. `interaction_strength` is
/// only filled in by [`System::with_interactions`] for reporting; couplings
/// are otherwise recomputed on demand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BathSite {
    pub angle: f64,
    pub distance: f64,
    #[serde(default)]
    pub interaction_strength: f64,
}

impl BathSite {
    pub fn new(angle: f64, distance: f64) -> Self {
        Self { angle, distance, interaction_strength: 0.0 }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DipoleMoments {
    pub bath: f64,
    pub atom: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub central: BathSite,
    pub bath: Vec<BathSite>,
    pub spin: f64,
    pub moments: DipoleMoments,
    #[serde(default)]
    pub units: Units,
    /// Explicit couplings indexed by particle (0 = central), overriding the
    /// geometric ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<Vec<f64>>,
}

impl System {
    pub fn new(bath: Vec<BathSite>, spin: f64, moments: DipoleMoments, units: Units) -> Self {
        Self {
            central: BathSite::default(),
            bath,
            spin,
            moments,
            units,
            coefficients: None,
        }
    }

    pub fn with_coefficients(mut self, coefficients: Vec<f64>) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    /// Central spin plus bath.
    pub fn particles(&self) -> usize {
        self.bath.len() + 1
    }

    pub fn single_particle_dim(&self) -> QResult<usize> {
        Ok(hilbert::spin::dim(self.spin)?)
    }

    /// Dimension of the full tensor-product space.
    pub fn dim(&self) -> QResult<usize> {
        Ok(self.single_particle_dim()?.pow(self.particles() as u32))
    }

    fn site(&self, j: usize) -> QResult<&BathSite> {
        if j == 0 || j > self.bath.len() {
            return Err(QuantumError::SiteOutOfRange { site: j, bath: self.bath.len() });
        }
        Ok(&self.bath[j - 1])
    }

    // k μ_b μ_a (1 - 3 cos²θ)
    fn dipolar_numerator(&self, site: &BathSite) -> f64 {
        self.units.coupling_constant()
            * self.moments.bath * self.moments.atom
            * (1.0 - 3.0 * site.angle * site.angle)
    }

    /// Coupling between the central spin and particle `j`.
    ///
    /// Particle 0 is the central spin itself and has no geometric coupling.
    /// Explicit coefficients are returned verbatim, including index 0.
    pub fn interaction_at(&self, j: usize) -> QResult<f64> {
        if let Some(coefficients) = &self.coefficients {
            return coefficients.get(j).copied().ok_or(QuantumError::MissingCoefficient(j));
        }
        if j == 0 {
            return Ok(0.0);
        }
        let site = self.site(j)?;
        Ok(self.dipolar_numerator(site) / site.distance.abs().powi(3))
    }

    /// Couplings of every particle, indexed like [`Self::interaction_at`].
    pub fn compute_interactions(&self) -> QResult<Vec<f64>> {
        (0..self.particles()).map(|j| self.interaction_at(j)).collect()
    }

    /// Copy of the system whose bath sites carry their couplings.
    pub fn with_interactions(&self) -> QResult<Self> {
        let strengths = self.compute_interactions()?;
        let mut out = self.clone();
        for (site, strength) in out.bath.iter_mut().zip(strengths.into_iter().skip(1)) {
            site.interaction_strength = strength;
        }
        Ok(out)
    }

    /// Distance at which bath particle `j` couples with `strength`, keeping
    /// its angle.
    pub fn distance_for_interaction(&self, j: usize, strength: f64) -> QResult<f64> {
        let site = self.site(j)?;
        Ok((self.dipolar_numerator(site) / strength).abs().cbrt())
    }
}

/// `max |J| - min |J|` over the bath couplings; zero for an empty bath.
pub fn spread(strengths: &[f64]) -> f64 {
    let mut abs = strengths.iter().map(|s| s.abs());
    let Some(first) = abs.next() else {
        return 0.0;
    };
    let (min, max) = abs.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_site() -> System {
        System::new(
            vec![BathSite::new(0.0, 1.0)],
            0.5,
            DipoleMoments { bath: 1.1e-10, atom: 1.0 },
            Units::Si,
        )
    }

    #[test]
    fn bath_index_is_checked() {
        assert!(two_site().interaction_at(2).is_err());
        assert!(two_site().distance_for_interaction(0, 1.0).is_err());
    }

    #[test]
    fn spread_ignores_sign() {
        assert!((spread(&[-3.0, 1.0, 2.0]) - 2.0).abs() < 1e-15);
        assert_eq!(spread(&[]), 0.0);
    }

    #[test]
    fn with_interactions_fills_sites() {
        let s = two_site().with_interactions().unwrap();
        assert!((s.bath[0].interaction_strength - 0.98865).abs() < 1e-4);
        assert_eq!(s.central.interaction_strength, 0.0);
    }
}
