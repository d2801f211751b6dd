//! Dense building blocks for many-spin Hilbert spaces.
//!
//! - [`spin`]: single-particle spin operators `Id`, `Sz`, `S+`, `S-` for any
//!   half-integer spin quantum number.
//! - [`many_body`]: embedding of single-particle operators and product states
//!   into the tensor-product space of `n` identical particles.
//! - [`sector`]: fixed-magnetization basis enumeration and principal-submatrix
//!   restriction.
//! - [`matrix`]: small dense helpers on top of [`faer`].

pub mod error;
pub mod many_body;
pub mod matrix;
pub mod sector;
pub mod spin;

pub use faer::{Mat, MatRef};

/// Dense real matrix used for every operator in the workspace.
pub type Matrix = Mat<f64>;

pub type HResult<T> = Result<T, error::HilbertError>;
