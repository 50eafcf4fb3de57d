use hgp_core::errors::{codes, ErrorInfo, HgpError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SolverConfig;
use crate::laplacian::Laplacian;
use crate::solver::{EigenPair, EigenRequest, EigenSolver, SolverStatus};

/// Components smaller than this are skipped when orienting the Fiedler vector.
const SIGN_THRESHOLD: f64 = 1e-12;

/// The two smallest eigenpairs of a Laplacian, indexed per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralPairs {
    /// Smallest eigenvalue, zero up to round-off for any Laplacian.
    pub trivial_value: f64,
    /// Second-smallest eigenvalue (algebraic connectivity).
    pub fiedler_value: f64,
    /// Fiedler vector; entry `i` belongs to node `i + 1`.
    pub fiedler: Vec<f64>,
}

/// Asks an [`EigenSolver`] for the two smallest eigenpairs of a Laplacian.
///
/// The padding row and column are removed before the request, so results
/// are indexed by node. The Fiedler vector is oriented so its first
/// component of non-negligible magnitude is negative, which makes the
/// outcome independent of the sign the solver happened to return.
pub struct SpectralSolverAdapter<'s> {
    solver: &'s dyn EigenSolver,
    ncv_multiplier: usize,
}

impl<'s> SpectralSolverAdapter<'s> {
    /// Number of eigenpairs requested from the solver.
    pub const PAIR_COUNT: usize = 2;

    /// Wraps a solver using the search-space multiplier from `config`.
    pub fn new(solver: &'s dyn EigenSolver, config: &SolverConfig) -> Self {
        Self {
            solver,
            ncv_multiplier: config.ncv_multiplier,
        }
    }

    /// Returns the name of the wrapped solver.
    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    /// Solves for the trivial and Fiedler pairs.
    pub fn solve(&self, laplacian: &Laplacian) -> Result<SpectralPairs, HgpError> {
        let matrix = laplacian.without_padding();
        let request = EigenRequest {
            matrix: &matrix,
            count: Self::PAIR_COUNT,
            search_dim: Self::PAIR_COUNT.saturating_mul(self.ncv_multiplier),
        };
        let result = self.solver.smallest(&request);
        if result.status != SolverStatus::Success {
            warn!(
                solver = self.solver.name(),
                status = %result.status,
                restarts = result.restarts,
                "eigensolver failed"
            );
        }
        debug!(
            solver = self.solver.name(),
            restarts = result.restarts,
            matvecs = result.matvecs,
            "eigensolve finished"
        );
        let pairs = result
            .into_pairs()
            .map_err(|err| err.with_context("solver", self.solver.name()))?;

        let [trivial, fiedler] = match <[EigenPair; 2]>::try_from(pairs) {
            Ok(pairs) => pairs,
            Err(pairs) => {
                return Err(HgpError::Solver(
                    ErrorInfo::new(codes::NOT_COMPUTED, "solver returned the wrong number of pairs")
                        .with_context("expected", Self::PAIR_COUNT)
                        .with_context("returned", pairs.len()),
                ))
            }
        };
        if fiedler.vector.len() != laplacian.node_count() {
            return Err(HgpError::Solver(
                ErrorInfo::new(codes::NUMERICAL_ISSUE, "eigenvector length differs from node count")
                    .with_context("expected", laplacian.node_count())
                    .with_context("returned", fiedler.vector.len()),
            ));
        }
        if !trivial.value.is_finite()
            || !fiedler.value.is_finite()
            || fiedler.vector.iter().any(|v| !v.is_finite())
        {
            return Err(HgpError::Solver(ErrorInfo::new(
                codes::NUMERICAL_ISSUE,
                "eigenpair contains non-finite values",
            )));
        }

        let mut vector = fiedler.vector;
        orient_sign(&mut vector);
        Ok(SpectralPairs {
            trivial_value: trivial.value,
            fiedler_value: fiedler.value,
            fiedler: vector,
        })
    }
}

/// Flips `vector` so its first component with magnitude above 1e-12 is negative.
pub fn orient_sign(vector: &mut [f64]) {
    let leading = vector.iter().find(|v| v.abs() > SIGN_THRESHOLD).copied();
    if leading.is_some_and(|v| v > 0.0) {
        vector.iter_mut().for_each(|v| *v = -*v);
    }
}
