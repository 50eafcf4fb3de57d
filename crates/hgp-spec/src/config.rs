use std::fs;
use std::path::Path;

use hgp_core::errors::{codes, ErrorInfo, HgpError};
use serde::{Deserialize, Serialize};

use crate::lanczos::LanczosSolver;
use crate::solver::{DenseSolver, EigenSolver};

/// YAML-configurable parameters governing a partitioning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Laplacian assembly settings.
    #[serde(default)]
    pub laplacian: LaplacianConfig,
    /// Eigensolver settings.
    #[serde(default)]
    pub solver: SolverConfig,
    /// Re-check adjacency symmetry and Laplacian row sums between stages.
    #[serde(default)]
    pub verify_invariants: bool,
}

#[allow(clippy::derivable_impls)]
impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            laplacian: LaplacianConfig::default(),
            solver: SolverConfig::default(),
            verify_invariants: false,
        }
    }
}

impl PartitionConfig {
    /// Parses a configuration from YAML text and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self, HgpError> {
        let config: Self = serde_yaml::from_str(text).map_err(|err| {
            HgpError::Config(ErrorInfo::new(codes::YAML_DESERIALIZE, err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, HgpError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            HgpError::Io(
                ErrorInfo::new(codes::READ_FAILED, "failed to read configuration file")
                    .with_context("path", path.display())
                    .with_context("reason", err),
            )
        })?;
        Self::from_yaml_str(&text).map_err(|err| err.with_context("path", path.display()))
    }

    /// Rejects values no run could succeed with.
    pub fn validate(&self) -> Result<(), HgpError> {
        let solver = &self.solver;
        if solver.ncv_multiplier == 0 {
            return Err(config_error("solver.ncv_multiplier", "must be at least 1")
                .with_context("value", solver.ncv_multiplier));
        }
        if solver.max_restarts == 0 {
            return Err(config_error("solver.max_restarts", "must be at least 1")
                .with_context("value", solver.max_restarts));
        }
        if !solver.tolerance.is_finite() || solver.tolerance <= 0.0 {
            return Err(
                config_error("solver.tolerance", "must be a finite positive number")
                    .with_context("value", solver.tolerance),
            );
        }
        Ok(())
    }
}

/// Laplacian assembly settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaplacianConfig {
    /// Per-row preallocation hint; exceeding it only costs a reallocation.
    #[serde(default = "default_expected_max_degree")]
    pub expected_max_degree: usize,
}

fn default_expected_max_degree() -> usize {
    700
}

impl Default for LaplacianConfig {
    fn default() -> Self {
        Self {
            expected_max_degree: default_expected_max_degree(),
        }
    }
}

/// Eigensolver implementation selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Restarted Lanczos iteration over the sparse matrix.
    Lanczos,
    /// Full dense symmetric eigen-decomposition.
    Dense,
}

#[allow(clippy::derivable_impls)]
impl Default for SolverKind {
    fn default() -> Self {
        SolverKind::Lanczos
    }
}

/// Eigensolver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Solver implementation.
    #[serde(default)]
    pub kind: SolverKind,
    /// Search space size as a multiple of the requested pair count.
    #[serde(default = "default_ncv_multiplier")]
    pub ncv_multiplier: usize,
    /// Upper bound on Lanczos restarts before giving up.
    #[serde(default = "default_max_restarts")]
    pub max_restarts: usize,
    /// Residual tolerance relative to the estimated spectral norm.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Master seed for starting vectors.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_ncv_multiplier() -> usize {
    10
}

fn default_max_restarts() -> usize {
    1000
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_seed() -> u64 {
    0x5eed
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            kind: SolverKind::default(),
            ncv_multiplier: default_ncv_multiplier(),
            max_restarts: default_max_restarts(),
            tolerance: default_tolerance(),
            seed: default_seed(),
        }
    }
}

impl SolverConfig {
    /// Instantiates the configured solver.
    pub fn build(&self) -> Box<dyn EigenSolver> {
        match self.kind {
            SolverKind::Lanczos => Box::new(LanczosSolver::new(self)),
            SolverKind::Dense => Box::new(DenseSolver),
        }
    }
}

fn config_error(field: &str, message: &str) -> HgpError {
    HgpError::Config(
        ErrorInfo::new(codes::INVALID_CONFIG, format!("{field} {message}"))
            .with_context("field", field),
    )
}
