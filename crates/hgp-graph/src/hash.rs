use sha2::{Digest, Sha256};

use crate::hypergraph::Hypergraph;

/// Computes the canonical structural hash for the provided graph.
///
/// The digest covers the node count and the ordered hyperedge sequence, so
/// two graphs hash equal exactly when a parse of their text forms would.
pub fn canonical_hash(graph: &Hypergraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"hgp:hypergraph:v1");
    hasher.update((graph.node_count() as u64).to_le_bytes());
    hasher.update((graph.edge_count() as u64).to_le_bytes());
    for edge in graph.hyperedges() {
        hasher.update((edge.len() as u64).to_le_bytes());
        for node in edge.nodes() {
            hasher.update(node.as_raw().to_le_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
