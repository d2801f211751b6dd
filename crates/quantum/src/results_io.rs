//! YAML persistence of eigen-solutions.

use crate::{diag::EigenSolution, error::QuantumError, system::System, QResult};
use hilbert::matrix::{from_row_major, to_row_major};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct EigenFile {
    #[serde(default)]
    system: Option<System>,
    dim: usize,
    eigenvalues: Vec<f64>,
    /// Row-major `dim x dim`.
    eigenvectors: Vec<f64>,
}

pub fn save_eigen(path: impl AsRef<Path>, eigen: &EigenSolution, system: &System) -> QResult<()> {
    let path = path.as_ref();
    let file = EigenFile {
        system: Some(system.clone()),
        dim: eigen.dim(),
        eigenvalues: eigen.values.clone(),
        eigenvectors: to_row_major(eigen.vectors.as_ref()),
    };
    fs::write(path, serde_yaml::to_string(&file)?)?;
    info!(path = %path.display(), "saved eigen-solution");
    Ok(())
}

pub fn load_eigen(path: impl AsRef<Path>) -> QResult<EigenSolution> {
    let path = path.as_ref();
    let file: EigenFile = serde_yaml::from_str(&fs::read_to_string(path)?)?;
    if file.eigenvalues.len() != file.dim {
        return Err(QuantumError::Malformed(format!(
            "{} eigenvalues for dimension {}", file.eigenvalues.len(), file.dim,
        )));
    }
    if file.eigenvectors.len() != file.dim * file.dim {
        return Err(QuantumError::Malformed(format!(
            "{} eigenvector entries for dimension {}", file.eigenvectors.len(), file.dim,
        )));
    }
    info!(path = %path.display(), dim = file.dim, "loaded eigen-solution");
    Ok(EigenSolution {
        vectors: from_row_major(file.dim, file.dim, &file.eigenvectors),
        values: file.eigenvalues,
    })
}
