use std::path::Path;

use hgp_core::errors::HgpError;
use hgp_graph::{canonical_hash, expand_cliques, read_hypergraph_file, Hypergraph};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::adapter::SpectralSolverAdapter;
use crate::bisect::{bisect, Partition};
use crate::config::PartitionConfig;
use crate::laplacian::LaplacianBuilder;
use crate::solver::EigenSolver;

/// Summary of a completed spectral bisection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionReport {
    /// Canonical hash of the input hypergraph.
    pub graph_hash: String,
    /// Number of nodes.
    pub node_count: usize,
    /// Number of hyperedges.
    pub edge_count: usize,
    /// Largest node degree after clique expansion.
    pub max_degree: usize,
    /// Stored entries in the padded Laplacian.
    pub laplacian_nnz: usize,
    /// Name of the eigensolver that ran.
    pub solver: String,
    /// The two smallest Laplacian eigenvalues, ascending.
    pub eigenvalues: [f64; 2],
    /// Lower median of the Fiedler vector.
    pub median: f64,
    /// Fiedler components equal to the median.
    pub ties_at_median: usize,
    /// Node counts of parts 0 and 1.
    pub part_sizes: [usize; 2],
    /// Hyperedges spanning both parts.
    pub cut_size: usize,
    /// Oriented Fiedler vector, entry `i` belonging to node `i + 1`.
    pub fiedler: Vec<f64>,
    /// Part label per node.
    pub partition: Partition,
}

/// Partitions a hypergraph with the solver selected by `config`.
pub fn partition_hypergraph(
    graph: &Hypergraph,
    config: &PartitionConfig,
) -> Result<PartitionReport, HgpError> {
    config.validate()?;
    let solver = config.solver.build();
    partition_with_solver(graph, config, solver.as_ref())
}

/// Runs clique expansion, Laplacian assembly, the eigensolve and the median split.
#[instrument(
    skip_all,
    fields(nodes = graph.node_count(), edges = graph.edge_count(), solver = solver.name())
)]
pub fn partition_with_solver(
    graph: &Hypergraph,
    config: &PartitionConfig,
    solver: &dyn EigenSolver,
) -> Result<PartitionReport, HgpError> {
    let adjacency = expand_cliques(graph);
    if config.verify_invariants {
        adjacency.check_symmetry()?;
    }

    let laplacian = LaplacianBuilder::new(&config.laplacian).build(&adjacency);
    if config.verify_invariants {
        laplacian.check_symmetric()?;
        laplacian.check_zero_row_sums()?;
    }

    let adapter = SpectralSolverAdapter::new(solver, &config.solver);
    let pairs = adapter.solve(&laplacian)?;
    let bisection = bisect(&pairs.fiedler)?;
    let cut_size = bisection.partition.cut_size(graph)?;

    let report = PartitionReport {
        graph_hash: canonical_hash(graph),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        max_degree: adjacency.max_degree(),
        laplacian_nnz: laplacian.nnz(),
        solver: adapter.solver_name().to_string(),
        eigenvalues: [pairs.trivial_value, pairs.fiedler_value],
        median: bisection.median,
        ties_at_median: bisection.ties,
        part_sizes: bisection.partition.part_sizes(),
        cut_size,
        fiedler: pairs.fiedler,
        partition: bisection.partition,
    };
    info!(
        fiedler_value = report.eigenvalues[1],
        part0 = report.part_sizes[0],
        part1 = report.part_sizes[1],
        cut_size = report.cut_size,
        "partition complete"
    );
    Ok(report)
}

/// Loads a hypergraph file and partitions it.
pub fn partition_file(
    path: impl AsRef<Path>,
    config: &PartitionConfig,
) -> Result<PartitionReport, HgpError> {
    let graph = read_hypergraph_file(path)?;
    partition_hypergraph(&graph, config)
}
