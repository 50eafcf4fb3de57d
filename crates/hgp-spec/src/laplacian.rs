use hgp_core::errors::{codes, ErrorInfo, HgpError};
use hgp_graph::AdjacencyList;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LaplacianConfig;

/// Sparse matrix entry represented in coordinate form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatrixEntry {
    /// Row index of the entry.
    pub row: usize,
    /// Column index of the entry.
    pub col: usize,
    /// Stored value.
    pub value: f64,
}

/// Square sparse matrix with column-sorted rows.
///
/// Absent entries are zero. Solvers treat the matrix as symmetric; callers
/// that build one by hand are responsible for inserting both triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    dim: usize,
    rows: Vec<Vec<(usize, f64)>>,
}

impl SparseMatrix {
    /// Creates an all-zero `dim x dim` matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            rows: vec![Vec::new(); dim],
        }
    }

    /// Creates an all-zero matrix reserving `capacity` entries for every row.
    pub fn with_row_capacity(dim: usize, capacity: usize) -> Self {
        Self {
            dim,
            rows: (0..dim).map(|_| Vec::with_capacity(capacity)).collect(),
        }
    }

    /// Builds a matrix from coordinate entries, later duplicates overwrite earlier ones.
    pub fn from_entries(dim: usize, entries: &[MatrixEntry]) -> Result<Self, HgpError> {
        let mut matrix = Self::zeros(dim);
        for entry in entries {
            matrix.insert(entry.row, entry.col, entry.value)?;
        }
        Ok(matrix)
    }

    /// Sets the value at `(row, col)`.
    pub fn insert(&mut self, row: usize, col: usize, value: f64) -> Result<(), HgpError> {
        if row >= self.dim || col >= self.dim {
            return Err(HgpError::Graph(
                ErrorInfo::new(codes::INDEX_OUT_OF_BOUNDS, "matrix index outside dimension")
                    .with_context("row", row)
                    .with_context("col", col)
                    .with_context("dim", self.dim),
            ));
        }
        let entries = &mut self.rows[row];
        match entries.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(pos) => entries[pos].1 = value,
            Err(pos) => entries.insert(pos, (col, value)),
        }
        Ok(())
    }

    /// Returns the matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns the value at `(row, col)`, zero when absent or out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows
            .get(row)
            .and_then(|entries| {
                entries
                    .binary_search_by_key(&col, |&(c, _)| c)
                    .ok()
                    .map(|pos| entries[pos].1)
            })
            .unwrap_or(0.0)
    }

    /// Returns the stored `(col, value)` entries of a row in column order.
    pub fn row(&self, row: usize) -> &[(usize, f64)] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the sum of a row's entries.
    pub fn row_sum(&self, row: usize) -> f64 {
        self.row(row).iter().map(|&(_, value)| value).sum()
    }

    /// Computes `y = A x`.
    pub fn mul_vec(&self, x: &[f64], y: &mut [f64]) {
        for (out, entries) in y.iter_mut().zip(&self.rows) {
            *out = entries.iter().map(|&(col, value)| value * x[col]).sum();
        }
    }

    /// Returns whether `A[i][j] == A[j][i]` for every stored entry.
    pub fn is_symmetric(&self) -> bool {
        self.rows.iter().enumerate().all(|(row, entries)| {
            entries
                .iter()
                .all(|&(col, value)| self.get(col, row) == value)
        })
    }

    /// Returns every stored entry in row-major order.
    pub fn entries(&self) -> Vec<MatrixEntry> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, entries)| {
                entries
                    .iter()
                    .map(move |&(col, value)| MatrixEntry { row, col, value })
            })
            .collect()
    }

    /// Expands the matrix into dense storage.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::<f64>::zeros(self.dim, self.dim);
        for (row, entries) in self.rows.iter().enumerate() {
            for &(col, value) in entries {
                dense[(row, col)] = value;
            }
        }
        dense
    }

    /// Drops the first `skip` rows and columns, shifting the remaining indices down.
    pub fn trailing_block(&self, skip: usize) -> SparseMatrix {
        let dim = self.dim.saturating_sub(skip);
        let rows = self
            .rows
            .iter()
            .skip(skip)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|&&(col, _)| col >= skip)
                    .map(|&(col, value)| (col - skip, value))
                    .collect()
            })
            .collect();
        SparseMatrix { dim, rows }
    }
}

/// Graph Laplacian of a clique-expanded hypergraph.
///
/// The matrix has dimension `node_count + 1`; row and column 0 are empty
/// padding so node ids index rows directly. Entry `(i, i)` is the degree of
/// node `i` and `(i, j)` is `-1` for every neighbour `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Laplacian {
    matrix: SparseMatrix,
}

impl Laplacian {
    /// Returns the number of nodes (the dimension minus the padding row).
    pub fn node_count(&self) -> usize {
        self.matrix.dim() - 1
    }

    /// Returns the padded dimension `node_count + 1`.
    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }

    /// Returns the underlying padded matrix.
    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    /// Returns the value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix.get(row, col)
    }

    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Returns the diagonal entry of a node, i.e. its degree.
    pub fn degree(&self, node: usize) -> f64 {
        self.matrix.get(node, node)
    }

    /// Returns the Laplacian restricted to nodes `1..=node_count`, indexed from 0.
    pub fn without_padding(&self) -> SparseMatrix {
        self.matrix.trailing_block(1)
    }

    /// Verifies that every row sums to exactly zero.
    pub fn check_zero_row_sums(&self) -> Result<(), HgpError> {
        for row in 0..self.matrix.dim() {
            let sum = self.matrix.row_sum(row);
            if sum != 0.0 {
                return Err(HgpError::Invariant(
                    ErrorInfo::new(codes::NONZERO_ROW_SUM, "laplacian row does not sum to zero")
                        .with_context("row", row)
                        .with_context("sum", sum),
                ));
            }
        }
        Ok(())
    }

    /// Verifies that the stored matrix is symmetric.
    pub fn check_symmetric(&self) -> Result<(), HgpError> {
        if self.matrix.is_symmetric() {
            Ok(())
        } else {
            Err(HgpError::Invariant(ErrorInfo::new(
                codes::ADJACENCY_ASYMMETRY,
                "laplacian is not symmetric",
            )))
        }
    }
}

/// Assembles sparse Laplacians from adjacency lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaplacianBuilder {
    expected_max_degree: usize,
}

impl LaplacianBuilder {
    /// Creates a builder using the configured preallocation hint.
    pub fn new(config: &LaplacianConfig) -> Self {
        Self {
            expected_max_degree: config.expected_max_degree,
        }
    }

    /// Builds the padded Laplacian of the provided adjacency list.
    pub fn build(&self, adjacency: &AdjacencyList) -> Laplacian {
        let node_count = adjacency.node_count();
        let capacity = self.expected_max_degree.min(node_count.saturating_sub(1)) + 1;
        let mut matrix = SparseMatrix::with_row_capacity(node_count + 1, capacity);
        matrix.rows[0] = Vec::new();
        for (node, neighbours) in adjacency.rows() {
            let index = node.index();
            let row = &mut matrix.rows[index];
            row.extend(neighbours.range(..node).map(|n| (n.index(), -1.0)));
            row.push((index, neighbours.len() as f64));
            row.extend(neighbours.range(node..).map(|n| (n.index(), -1.0)));
        }

        let max_degree = adjacency.max_degree();
        if max_degree > self.expected_max_degree {
            debug!(
                max_degree,
                hint = self.expected_max_degree,
                "row preallocation hint exceeded"
            );
        }
        let laplacian = Laplacian { matrix };
        debug!(
            dim = laplacian.dim(),
            nnz = laplacian.nnz(),
            "assembled laplacian"
        );
        laplacian
    }
}

impl Default for LaplacianBuilder {
    fn default() -> Self {
        Self::new(&LaplacianConfig::default())
    }
}
