#![deny(missing_docs)]

//! Spectral bisection stages for the HGP partitioner: Laplacian assembly,
//! the eigensolver boundary, Fiedler orientation and the median split.
//!
//! [`partition_hypergraph`] chains the stages end to end; each stage is also
//! usable on its own.

mod adapter;
mod bisect;
mod config;
mod lanczos;
mod laplacian;
mod pipeline;
mod solver;

pub use adapter::{orient_sign, SpectralPairs, SpectralSolverAdapter};
pub use bisect::{bisect, median, Bisection, Part, Partition};
pub use config::{LaplacianConfig, PartitionConfig, SolverConfig, SolverKind};
pub use lanczos::LanczosSolver;
pub use laplacian::{Laplacian, LaplacianBuilder, MatrixEntry, SparseMatrix};
pub use pipeline::{partition_file, partition_hypergraph, partition_with_solver, PartitionReport};
pub use solver::{DenseSolver, EigenPair, EigenRequest, EigenResult, EigenSolver, SolverStatus};
