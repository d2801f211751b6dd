use hilbert::error::HilbertError;
use quantum::error::QuantumError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Quantum(#[from] QuantumError),

    #[error(transparent)]
    Hilbert(#[from] HilbertError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("the field {section}.{field} is required and not provided")]
    MissingField { section: &'static str, field: &'static str },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A sweep job failed; the whole sweep is abandoned.
    #[error("sweep job {job} failed: {message}")]
    Worker { job: usize, message: String },
}

pub type SimResult<T> = Result<T, SimError>;
