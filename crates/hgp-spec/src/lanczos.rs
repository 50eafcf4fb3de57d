use hgp_core::RngHandle;
use nalgebra::{DMatrix, SymmetricEigen};
use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::solver::{
    dot, norm, DenseSolver, EigenPair, EigenRequest, EigenResult, EigenSolver, SolverStatus,
};

/// Relative size below which a new Lanczos direction counts as a breakdown.
const BREAKDOWN: f64 = 1e-12;
/// Weight of the fresh random direction mixed into the start vector after a lock.
const RESTART_NOISE: f64 = 1e-2;

/// Explicitly restarted Lanczos iteration with full reorthogonalisation.
///
/// Each cycle builds a Krylov basis of `search_dim - locked` vectors kept
/// orthogonal to every basis vector and every locked eigenvector, then
/// solves the small tridiagonal problem densely. The smallest Ritz pair is
/// locked once its residual estimate drops below `tolerance` times the
/// spectral norm estimate; otherwise the next cycle restarts from the wanted
/// Ritz vectors. Only the smallest algebraic end of the spectrum is
/// targeted, which equals the smallest-magnitude end for positive
/// semidefinite matrices such as Laplacians.
#[derive(Debug, Clone, PartialEq)]
pub struct LanczosSolver {
    max_restarts: usize,
    tolerance: f64,
    seed: u64,
}

impl LanczosSolver {
    /// Creates a solver from the run configuration.
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            max_restarts: config.max_restarts,
            tolerance: config.tolerance,
            seed: config.seed,
        }
    }

    fn random_vector(&self, dim: usize, stream: u64) -> Vec<f64> {
        RngHandle::substream(self.seed, stream).unit_direction(dim)
    }
}

impl Default for LanczosSolver {
    fn default() -> Self {
        Self::new(&SolverConfig::default())
    }
}

impl EigenSolver for LanczosSolver {
    fn name(&self) -> &'static str {
        "lanczos"
    }

    fn smallest(&self, request: &EigenRequest<'_>) -> EigenResult {
        let matrix = request.matrix;
        let dim = matrix.dim();
        let wanted = request.count;
        if wanted == 0 || wanted > dim {
            return EigenResult::failed(SolverStatus::NotComputed);
        }
        let search_dim = request.search_dim.max(wanted + 1);
        if search_dim >= dim {
            debug!(dim, search_dim, "search space covers the problem, solving densely");
            return DenseSolver.smallest(request);
        }

        let mut locked_values: Vec<f64> = Vec::with_capacity(wanted);
        let mut locked: Vec<Vec<f64>> = Vec::with_capacity(wanted);
        let mut stream = 0u64;
        let mut start = self.random_vector(dim, stream);
        let mut w = vec![0.0; dim];
        let mut matvecs = 0usize;
        let mut norm_estimate = 0.0f64;

        for restart in 0..self.max_restarts {
            let mut q0 = start;
            if !orthonormalize(&mut q0, &locked) {
                stream += 1;
                q0 = self.random_vector(dim, stream);
                if !orthonormalize(&mut q0, &locked) {
                    return partial(SolverStatus::NumericalIssue, &locked_values, &locked, restart, matvecs);
                }
            }

            let steps = search_dim - locked.len();
            let mut basis: Vec<Vec<f64>> = Vec::with_capacity(steps);
            basis.push(q0);
            let mut alpha: Vec<f64> = Vec::with_capacity(steps);
            let mut beta: Vec<f64> = Vec::with_capacity(steps);
            let residual_beta = loop {
                let j = basis.len() - 1;
                matrix.mul_vec(&basis[j], &mut w);
                matvecs += 1;
                let a = dot(&basis[j], &w);
                alpha.push(a);
                for _ in 0..2 {
                    project_out(&mut w, &locked);
                    project_out(&mut w, &basis);
                }
                let b = norm(&w);
                if !a.is_finite() || !b.is_finite() {
                    return partial(SolverStatus::NumericalIssue, &locked_values, &locked, restart, matvecs);
                }
                norm_estimate = norm_estimate.max(a.abs() + b);
                if basis.len() == steps {
                    break b;
                }
                if b <= BREAKDOWN * norm_estimate {
                    break 0.0;
                }
                beta.push(b);
                basis.push(w.iter().map(|x| x / b).collect());
            };

            let m = alpha.len();
            let mut tridiagonal = DMatrix::<f64>::zeros(m, m);
            for (i, &a) in alpha.iter().enumerate() {
                tridiagonal[(i, i)] = a;
            }
            for (i, &b) in beta.iter().enumerate() {
                tridiagonal[(i, i + 1)] = b;
                tridiagonal[(i + 1, i)] = b;
            }
            let ritz = SymmetricEigen::new(tridiagonal);
            if ritz.eigenvalues.iter().any(|v| !v.is_finite()) {
                return partial(SolverStatus::NumericalIssue, &locked_values, &locked, restart, matvecs);
            }
            let mut order: Vec<usize> = (0..m).collect();
            order.sort_by(|&x, &y| ritz.eigenvalues[x].total_cmp(&ritz.eigenvalues[y]));
            let spectral_norm = ritz
                .eigenvalues
                .iter()
                .fold(norm_estimate, |acc, v| acc.max(v.abs()));

            let first = order[0];
            let theta = ritz.eigenvalues[first];
            let residual = (residual_beta * ritz.eigenvectors[(m - 1, first)]).abs();
            trace!(restart, theta, residual, locked = locked.len(), "lanczos cycle");

            if residual <= self.tolerance * spectral_norm {
                let mut vector = combine(&basis, ritz.eigenvectors.column(first).iter().copied(), dim);
                if !orthonormalize(&mut vector, &locked) {
                    return partial(SolverStatus::NumericalIssue, &locked_values, &locked, restart, matvecs);
                }
                locked_values.push(theta);
                locked.push(vector);
                if locked.len() == wanted {
                    debug!(restarts = restart + 1, matvecs, "lanczos converged");
                    return partial(SolverStatus::Success, &locked_values, &locked, restart + 1, matvecs);
                }
                stream += 1;
                let noise = self.random_vector(dim, stream);
                start = match order.get(1) {
                    Some(&next) => combine(&basis, ritz.eigenvectors.column(next).iter().copied(), dim),
                    None => vec![0.0; dim],
                };
                for (s, n) in start.iter_mut().zip(&noise) {
                    *s += RESTART_NOISE * n;
                }
            } else {
                let remaining = (wanted - locked.len()).min(m);
                start = vec![0.0; dim];
                for &idx in &order[..remaining] {
                    let ritz_vector =
                        combine(&basis, ritz.eigenvectors.column(idx).iter().copied(), dim);
                    for (s, r) in start.iter_mut().zip(&ritz_vector) {
                        *s += r;
                    }
                }
            }
        }

        debug!(
            restarts = self.max_restarts,
            converged = locked.len(),
            "lanczos restart budget exhausted"
        );
        partial(
            SolverStatus::NotConverged,
            &locked_values,
            &locked,
            self.max_restarts,
            matvecs,
        )
    }
}

fn partial(
    status: SolverStatus,
    values: &[f64],
    vectors: &[Vec<f64>],
    restarts: usize,
    matvecs: usize,
) -> EigenResult {
    let mut pairs: Vec<EigenPair> = values
        .iter()
        .zip(vectors)
        .map(|(&value, vector)| EigenPair {
            value,
            vector: vector.clone(),
        })
        .collect();
    pairs.sort_by(|a, b| {
        a.value
            .abs()
            .total_cmp(&b.value.abs())
            .then(a.value.total_cmp(&b.value))
    });
    EigenResult {
        status,
        pairs,
        restarts,
        matvecs,
    }
}

/// Removes the components of `v` along each (orthonormal) vector of `basis`.
fn project_out(v: &mut [f64], basis: &[Vec<f64>]) {
    for q in basis {
        let coefficient = dot(v, q);
        for (x, y) in v.iter_mut().zip(q) {
            *x -= coefficient * y;
        }
    }
}

/// Orthogonalises `v` against `basis` and scales it to unit length.
///
/// Returns `false` when nothing meaningful remains.
fn orthonormalize(v: &mut [f64], basis: &[Vec<f64>]) -> bool {
    let before = norm(v);
    if !before.is_finite() || before == 0.0 {
        return false;
    }
    project_out(v, basis);
    project_out(v, basis);
    let after = norm(v);
    if !after.is_finite() || after <= BREAKDOWN * before {
        return false;
    }
    v.iter_mut().for_each(|x| *x /= after);
    true
}

fn combine(basis: &[Vec<f64>], coefficients: impl Iterator<Item = f64>, dim: usize) -> Vec<f64> {
    let mut out = vec![0.0; dim];
    for (coefficient, q) in coefficients.zip(basis) {
        for (o, x) in out.iter_mut().zip(q) {
            *o += coefficient * x;
        }
    }
    out
}
