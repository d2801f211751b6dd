//! Bath arrangements around the central spin.
//!
//! Each geometry places bath site `j` on a unit shape centred on the central
//! spin; the shape is tilted about the x axis by `tilt` (in units of π) and
//! the cosine of the polar angle between the site and the field axis is what
//! enters the coupling.

use crate::{error::QuantumError, system::BathSite};
use serde::{Deserialize, Serialize};
use std::{f64::consts::PI, str::FromStr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    Ring,
    Cube,
    Dodecahedron,
    Icosahedron,
    Sphere,
}

const FRAC_1_SQRT_3: f64 = 0.577_350_269_189_625_8;

fn cube() -> [[f64; 3]; 8] {
    let a = FRAC_1_SQRT_3;
    [
        [a, a, a], [-a, a, a], [a, -a, a], [-a, -a, a],
        [a, a, -a], [-a, a, -a], [a, -a, -a], [-a, -a, -a],
    ]
}

fn dodecahedron() -> [[f64; 3]; 20] {
    let a = FRAC_1_SQRT_3;
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0 * a;
    let iphi = 2.0 / (1.0 + 5.0_f64.sqrt()) * a;
    [
        [a, a, a], [-a, a, a], [a, -a, a], [-a, -a, a],
        [a, a, -a], [-a, a, -a], [a, -a, -a], [-a, -a, -a],
        [0.0, phi, iphi], [0.0, -phi, iphi], [0.0, phi, -iphi], [0.0, -phi, -iphi],
        [iphi, 0.0, phi], [-iphi, 0.0, phi], [iphi, 0.0, -phi], [-iphi, 0.0, -phi],
        [phi, iphi, 0.0], [-phi, iphi, 0.0], [phi, -iphi, 0.0], [-phi, -iphi, 0.0],
    ]
}

const ICOSAHEDRON: [[f64; 3]; 12] = [
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
    [-0.894427, 0.0, -0.447214],
    [0.894427, 0.0, 0.447214],
    [0.723607, -0.525731, -0.447214],
    [0.723607, 0.525731, -0.447214],
    [-0.723607, -0.525731, 0.447214],
    [-0.723607, 0.525731, 0.447214],
    [-0.276393, -0.850651, -0.447214],
    [-0.276393, 0.850651, -0.447214],
    [0.276393, -0.850651, 0.447214],
    [0.276393, 0.850651, 0.447214],
];

// z component after rotating `v` by `tilt` radians about x
fn tilted_z(v: [f64; 3], tilt: f64) -> f64 {
    v[1] * tilt.sin() + v[2] * tilt.cos()
}

impl Geometry {
    /// Cosine of the polar angle of bath site `j` out of `bath_count`.
    ///
    /// Sites beyond a solid's vertex count sit at `0.0`.
    pub fn polar_angle_cos(self, j: usize, bath_count: usize, tilt: f64) -> f64 {
        let tilt = tilt * PI;
        match self {
            Self::Ring => (2.0 * j as f64 * PI / bath_count as f64).cos() * tilt.sin(),
            Self::Cube => cube().get(j).map_or(0.0, |&v| tilted_z(v, tilt)),
            Self::Dodecahedron => dodecahedron().get(j).map_or(0.0, |&v| tilted_z(v, tilt)),
            Self::Icosahedron => ICOSAHEDRON.get(j).map_or(0.0, |&v| tilted_z(v, tilt)),
            Self::Sphere => {
                // golden spiral
                let n = bath_count as f64;
                let polar = (1.0 - 2.0 * (j as f64 + 0.5) / n).acos();
                let azimuth = PI * (1.0 + 5.0_f64.sqrt()) * j as f64;
                tilted_z([0.0, azimuth.sin() * polar.sin(), polar.cos()], tilt)
            }
        }
    }

    /// Bath sites `0..bath_count` at a common `distance`.
    pub fn bath_sites(self, bath_count: usize, tilt: f64, distance: f64) -> Vec<BathSite> {
        (0..bath_count)
            .map(|j| BathSite::new(self.polar_angle_cos(j, bath_count, tilt), distance))
            .collect()
    }
}

impl FromStr for Geometry {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ring" => Ok(Self::Ring),
            "cube" => Ok(Self::Cube),
            "dodecahedron" => Ok(Self::Dodecahedron),
            "icosahedron" => Ok(Self::Icosahedron),
            "sphere" => Ok(Self::Sphere),
            other => Err(QuantumError::UnknownGeometry(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_lie_on_the_unit_sphere() {
        for v in cube().iter().chain(dodecahedron().iter()).chain(ICOSAHEDRON.iter()) {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 1.0).abs() < 1e-5, "|v| = {}", r);
        }
    }

    #[test]
    fn untilted_ring_is_equatorial() {
        for j in 0..6 {
            assert!(Geometry::Ring.polar_angle_cos(j, 6, 0.0).abs() < 1e-15);
        }
    }

    #[test]
    fn out_of_range_vertex_is_zero() {
        assert_eq!(Geometry::Cube.polar_angle_cos(8, 9, 0.3), 0.0);
        assert_eq!(Geometry::Icosahedron.polar_angle_cos(12, 13, 0.3), 0.0);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("torus".parse::<Geometry>().is_err());
        assert_eq!("sphere".parse::<Geometry>().unwrap(), Geometry::Sphere);
    }
}
