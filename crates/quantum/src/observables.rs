use crate::{error::QuantumError, C64, QResult};
use hilbert::{
    error::DimensionError,
    many_body::many_body_operator,
    sector::restrict_to_subspace,
    spin::SpinOperator,
    Matrix,
};

/// Real operator whose expectation values are tracked over time.
#[derive(Clone, Debug)]
pub struct Observable {
    pub name: String,
    pub matrix: Matrix,
}

impl Observable {
    pub fn new(name: impl Into<String>, matrix: Matrix) -> Self {
        Self { name: name.into(), matrix }
    }

    /// Single-particle `op` acting on `slot` of `particles`, optionally
    /// restricted to a symmetry sector.
    pub fn from_operator(
        op: SpinOperator,
        spin: f64,
        slot: usize,
        particles: usize,
        sector: Option<&[usize]>,
    ) -> QResult<Self> {
        if slot >= particles {
            return Err(QuantumError::SiteOutOfRange {
                site: slot,
                bath: particles.saturating_sub(1),
            });
        }
        let full = many_body_operator(&op.matrix(spin)?, slot, particles);
        let matrix = match sector {
            Some(indices) => restrict_to_subspace(full.as_ref(), indices)?,
            None => full,
        };
        Ok(Self::new(format!("{}_{}", op.name(), slot), matrix))
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// `Re ⟨ψ|O|ψ⟩`; `psi` is not normalized here.
    pub fn expectation_value(&self, psi: &[C64]) -> QResult<f64> {
        DimensionError::check(self.matrix.ncols(), psi.len())?;
        DimensionError::check(self.matrix.nrows(), psi.len())?;
        let mut acc = C64::new(0.0, 0.0);
        for (a, pa) in psi.iter().enumerate() {
            let row: C64 = psi.iter().enumerate().map(|(b, pb)| *pb * self.matrix.read(a, b)).sum();
            acc += pa.conj() * row;
        }
        Ok(acc.re)
    }
}
