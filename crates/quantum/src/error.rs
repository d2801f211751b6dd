use hilbert::error::{DimensionError, HilbertError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantumError {
    #[error(transparent)]
    Hilbert(#[from] HilbertError),

    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// A symmetry sector must keep at least two basis states.
    #[error("symmetry sector has {0} basis states; need at least 2")]
    SectorTooSmall(usize),

    #[error("hamiltonian is not symmetric; max |H - H^T| = {max_deviation:e}")]
    AsymmetricHamiltonian { max_deviation: f64 },

    #[error("no interaction coefficient given for site {0}")]
    MissingCoefficient(usize),

    #[error("site {site} out of range for a bath of {bath}")]
    SiteOutOfRange { site: usize, bath: usize },

    #[error("unknown geometry {0:?}")]
    UnknownGeometry(String),

    #[error("unknown unit system {0:?}")]
    UnknownUnits(String),

    #[error("unknown operator {0:?}")]
    UnknownOperator(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A stored eigen-solution is internally inconsistent.
    #[error("malformed eigen-solution file: {0}")]
    Malformed(String),
}
