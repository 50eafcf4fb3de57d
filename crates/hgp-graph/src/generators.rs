use hgp_core::errors::{codes, ErrorInfo, HgpError};
use hgp_core::rng::RngHandle;
use hgp_core::NodeId;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::hypergraph::{Hyperedge, Hypergraph};

/// Generates a random valid hypergraph with deterministic randomness.
///
/// Every node is first dealt round-robin into the hyperedges so that the
/// contiguity invariant holds; each hyperedge is then topped up with random
/// extra members to a size drawn from `2..=max_edge_size` and shuffled.
pub fn gen_random_hypergraph(
    node_count: usize,
    edge_count: usize,
    max_edge_size: usize,
    rng: &mut RngHandle,
) -> Result<Hypergraph, HgpError> {
    if node_count == 0 || edge_count == 0 || max_edge_size == 0 {
        return Err(generator_error(
            codes::EMPTY_GRAPH,
            "random generator requires nodes, hyperedges and a positive edge size",
        )
        .with_context("node_count", node_count)
        .with_context("edge_count", edge_count)
        .with_context("max_edge_size", max_edge_size));
    }
    let max_edge_size = max_edge_size.min(node_count);
    if edge_count.saturating_mul(max_edge_size) < node_count {
        return Err(generator_error(
            codes::INSUFFICIENT_CAPACITY,
            "hyperedges cannot cover every node at the requested size",
        )
        .with_context("node_count", node_count)
        .with_context("capacity", edge_count * max_edge_size));
    }

    let mut order: Vec<NodeId> = hgp_core::node_range(node_count).collect();
    order.shuffle(rng);
    let mut members: Vec<Vec<NodeId>> = vec![Vec::new(); edge_count];
    for (idx, node) in order.into_iter().enumerate() {
        members[idx % edge_count].push(node);
    }

    let min_size = 2.min(max_edge_size);
    for edge in members.iter_mut() {
        let target = rng.gen_range(min_size..=max_edge_size).max(edge.len());
        while edge.len() < target {
            let candidate = NodeId::from_index(rng.gen_range(1..=node_count));
            if !edge.contains(&candidate) {
                edge.push(candidate);
            }
        }
        edge.shuffle(rng);
    }

    Hypergraph::new(node_count, members.into_iter().map(Hyperedge::new).collect())
}

/// Builds the path hypergraph `{1,2}, {2,3}, ..., {n-1,n}`.
pub fn path_hypergraph(node_count: usize) -> Result<Hypergraph, HgpError> {
    let hyperedges = (1..node_count as u64)
        .map(|u| Hyperedge::from_raw(&[u, u + 1]))
        .collect();
    Hypergraph::new(node_count, hyperedges)
}

fn generator_error(code: &str, message: impl Into<String>) -> HgpError {
    HgpError::Graph(ErrorInfo::new(code, message))
}
