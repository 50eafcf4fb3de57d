use std::fmt;

use hgp_core::errors::{codes, ErrorInfo, HgpError};
use nalgebra::SymmetricEigen;
use serde::{Deserialize, Serialize};

use crate::laplacian::SparseMatrix;

/// Outcome reported by an eigensolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverStatus {
    /// All requested pairs converged.
    Success,
    /// The restart budget ran out first.
    NotConverged,
    /// The request could not be started.
    NotComputed,
    /// Non-finite values appeared.
    NumericalIssue,
}

impl SolverStatus {
    /// Returns the stable error code matching a failure status.
    pub fn code(self) -> &'static str {
        match self {
            SolverStatus::Success => "success",
            SolverStatus::NotConverged => codes::NOT_CONVERGED,
            SolverStatus::NotComputed => codes::NOT_COMPUTED,
            SolverStatus::NumericalIssue => codes::NUMERICAL_ISSUE,
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Eigenvalue together with its unit-norm eigenvector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenPair {
    /// Eigenvalue.
    pub value: f64,
    /// Eigenvector components in matrix index order.
    pub vector: Vec<f64>,
}

/// Request for the smallest-magnitude eigenpairs of a symmetric matrix.
#[derive(Debug, Clone, Copy)]
pub struct EigenRequest<'a> {
    /// Symmetric matrix to decompose.
    pub matrix: &'a SparseMatrix,
    /// Number of pairs requested.
    pub count: usize,
    /// Size of the search space; solvers clamp it to `count + 1..=dim`.
    pub search_dim: usize,
}

/// Result of an eigensolve.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenResult {
    /// Completion status.
    pub status: SolverStatus,
    /// Converged pairs ascending by eigenvalue magnitude; complete only on success.
    pub pairs: Vec<EigenPair>,
    /// Number of restarts performed.
    pub restarts: usize,
    /// Number of matrix-vector products performed.
    pub matvecs: usize,
}

impl EigenResult {
    /// Creates a result carrying a failure status and no pairs.
    pub fn failed(status: SolverStatus) -> Self {
        Self {
            status,
            pairs: Vec::new(),
            restarts: 0,
            matvecs: 0,
        }
    }

    /// Returns the pairs, or a `Solver` error when the status is not `Success`.
    pub fn into_pairs(self) -> Result<Vec<EigenPair>, HgpError> {
        match self.status {
            SolverStatus::Success => Ok(self.pairs),
            status => Err(HgpError::Solver(
                ErrorInfo::new(status.code(), "eigensolver did not succeed")
                    .with_context("status", status)
                    .with_context("restarts", self.restarts)
                    .with_context("converged", self.pairs.len()),
            )),
        }
    }
}

/// Boundary over the eigensolver used by the pipeline.
///
/// Implementations return the `count` eigenpairs of smallest magnitude in
/// ascending order and report failures through [`SolverStatus`] instead of
/// panicking.
pub trait EigenSolver {
    /// Short name recorded in reports.
    fn name(&self) -> &'static str;

    /// Computes the requested eigenpairs.
    fn smallest(&self, request: &EigenRequest<'_>) -> EigenResult;
}

/// Solver running a full dense symmetric eigen-decomposition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DenseSolver;

impl EigenSolver for DenseSolver {
    fn name(&self) -> &'static str {
        "dense"
    }

    fn smallest(&self, request: &EigenRequest<'_>) -> EigenResult {
        let dim = request.matrix.dim();
        if request.count == 0 || request.count > dim {
            return EigenResult::failed(SolverStatus::NotComputed);
        }
        let decomposition = SymmetricEigen::new(request.matrix.to_dense());
        let mut order: Vec<usize> = (0..dim).collect();
        order.sort_by(|&a, &b| {
            let (x, y) = (decomposition.eigenvalues[a], decomposition.eigenvalues[b]);
            x.abs().total_cmp(&y.abs()).then(x.total_cmp(&y))
        });

        let mut pairs = Vec::with_capacity(request.count);
        for &idx in order.iter().take(request.count) {
            let value = decomposition.eigenvalues[idx];
            let vector: Vec<f64> = decomposition.eigenvectors.column(idx).iter().copied().collect();
            if !value.is_finite() || vector.iter().any(|v| !v.is_finite()) {
                return EigenResult::failed(SolverStatus::NumericalIssue);
            }
            pairs.push(EigenPair { value, vector });
        }
        EigenResult {
            status: SolverStatus::Success,
            pairs,
            restarts: 0,
            matvecs: 0,
        }
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}
