use std::collections::BTreeSet;

use hgp_core::errors::{codes, ErrorInfo, HgpError};
use hgp_core::NodeId;
use tracing::debug;

use crate::hypergraph::Hypergraph;

/// Neighbour sets of the clique-expanded graph over the nodes `1..=node_count`.
///
/// Slot 0 is kept empty so node ids index the storage directly. Neighbour
/// sets never contain the node itself and never list a neighbour twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList {
    neighbours: Vec<BTreeSet<NodeId>>,
}

impl AdjacencyList {
    /// Builds an adjacency list from explicit neighbour sets for nodes `1..=rows.len()`.
    ///
    /// Ids are range checked and self-loops rejected; symmetry is not enforced
    /// here, see [`AdjacencyList::check_symmetry`].
    pub fn from_rows(rows: Vec<BTreeSet<NodeId>>) -> Result<Self, HgpError> {
        let node_count = rows.len();
        for (offset, row) in rows.iter().enumerate() {
            let node = NodeId::from_index(offset + 1);
            for neighbour in row {
                if neighbour.as_raw() == 0 || neighbour.index() > node_count {
                    return Err(graph_error(codes::UNKNOWN_NODE, "neighbour outside node range")
                        .with_context("node", node)
                        .with_context("neighbour", neighbour));
                }
                if *neighbour == node {
                    return Err(graph_error(
                        codes::SELF_LOOP,
                        "adjacency rows may not list the node itself",
                    )
                    .with_context("node", node));
                }
            }
        }
        let mut neighbours = Vec::with_capacity(node_count + 1);
        neighbours.push(BTreeSet::new());
        neighbours.extend(rows);
        Ok(Self { neighbours })
    }

    /// Returns the number of nodes covered by the list.
    pub fn node_count(&self) -> usize {
        self.neighbours.len() - 1
    }

    /// Returns the neighbour set of a node.
    pub fn neighbours(&self, node: NodeId) -> Result<&BTreeSet<NodeId>, HgpError> {
        if node.as_raw() == 0 {
            return Err(unknown_node(node, self.node_count()));
        }
        self.neighbours
            .get(node.index())
            .ok_or_else(|| unknown_node(node, self.node_count()))
    }

    /// Returns the number of distinct neighbours of a node.
    pub fn degree(&self, node: NodeId) -> Result<usize, HgpError> {
        Ok(self.neighbours(node)?.len())
    }

    /// Returns whether `v` is listed as a neighbour of `u`.
    pub fn contains(&self, u: NodeId, v: NodeId) -> bool {
        u.as_raw() != 0
            && self
                .neighbours
                .get(u.index())
                .is_some_and(|row| row.contains(&v))
    }

    /// Iterates over `(node, neighbours)` for the nodes `1..=node_count`.
    pub fn rows(&self) -> impl Iterator<Item = (NodeId, &BTreeSet<NodeId>)> + '_ {
        self.neighbours
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| (NodeId::from_index(idx), row))
    }

    /// Returns the largest degree across all nodes.
    pub fn max_degree(&self) -> usize {
        self.neighbours.iter().map(BTreeSet::len).max().unwrap_or(0)
    }

    /// Returns the number of undirected edges, counting each listed pair once.
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.neighbours.iter().map(BTreeSet::len).sum();
        directed / 2
    }

    /// Verifies that `v ∈ adjacency[u] ⇔ u ∈ adjacency[v]` for all pairs.
    pub fn check_symmetry(&self) -> Result<(), HgpError> {
        for (node, row) in self.rows() {
            for neighbour in row {
                if !self.contains(*neighbour, node) {
                    return Err(HgpError::Invariant(
                        ErrorInfo::new(codes::ADJACENCY_ASYMMETRY, "adjacency is not symmetric")
                            .with_context("node", node)
                            .with_context("neighbour", neighbour),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Replaces every hyperedge with a clique over its distinct members.
///
/// Each unordered pair `{u, v}` with `u != v` is inserted in both directions,
/// so the result is symmetric by construction. Set insertion keeps the
/// neighbour count equal to the number of distinct neighbours.
pub fn expand_cliques(graph: &Hypergraph) -> AdjacencyList {
    let mut neighbours = vec![BTreeSet::new(); graph.node_count() + 1];
    for edge in graph.hyperedges() {
        let members = edge.distinct_nodes();
        for (idx, &u) in members.iter().enumerate() {
            for &v in &members[idx + 1..] {
                neighbours[u.index()].insert(v);
                neighbours[v.index()].insert(u);
            }
        }
    }
    let adjacency = AdjacencyList { neighbours };
    debug!(
        nodes = adjacency.node_count(),
        edges = adjacency.edge_count(),
        max_degree = adjacency.max_degree(),
        "expanded hyperedges into cliques"
    );
    adjacency
}

fn graph_error(code: &str, message: impl Into<String>) -> HgpError {
    HgpError::Graph(ErrorInfo::new(code, message))
}

fn unknown_node(node: NodeId, node_count: usize) -> HgpError {
    graph_error(codes::UNKNOWN_NODE, "node does not exist")
        .with_context("node", node)
        .with_context("node_count", node_count)
}
