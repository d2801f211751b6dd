//! Central-spin model: a single spin coupled by flip-flop terms to a bath of
//! spins, with exact diagonalization and spectral time evolution.

pub mod diag;
pub mod error;
pub mod evolution;
pub mod geometry;
pub mod hamiltonian;
pub mod observables;
pub mod results_io;
pub mod system;
pub mod units;

pub use hilbert::Matrix;
pub use num_complex::Complex64;

pub type C64 = Complex64;

pub type QResult<T> = Result<T, error::QuantumError>;
