use hgp_core::errors::{codes, ErrorInfo, HgpError};
use hgp_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::hypergraph::{Hyperedge, Hypergraph};

/// Serializes the graph to a compact binary snapshot using `bincode`.
pub fn graph_to_bytes(graph: &Hypergraph) -> Result<Vec<u8>, HgpError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| serde_error(codes::SERIALIZE_BYTES, err))
}

/// Restores and re-validates a graph from its binary snapshot.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Hypergraph, HgpError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| serde_error(codes::DESERIALIZE_BYTES, err))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &Hypergraph) -> Result<String, HgpError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| serde_error(codes::SERIALIZE_JSON, err))
}

/// Restores and re-validates a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<Hypergraph, HgpError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| serde_error(codes::DESERIALIZE_JSON, err))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    node_count: usize,
    hyperedges: Vec<Vec<u64>>,
}

impl SerializableGraph {
    fn from_graph(graph: &Hypergraph) -> Self {
        let hyperedges = graph
            .hyperedges()
            .iter()
            .map(|edge| edge.nodes().iter().map(NodeId::as_raw).collect())
            .collect();
        Self {
            node_count: graph.node_count(),
            hyperedges,
        }
    }

    fn into_graph(self) -> Result<Hypergraph, HgpError> {
        let hyperedges = self
            .hyperedges
            .iter()
            .map(|raw| Hyperedge::from_raw(raw))
            .collect();
        Hypergraph::new(self.node_count, hyperedges)
    }
}

fn serde_error(code: &str, err: impl ToString) -> HgpError {
    HgpError::Serde(ErrorInfo::new(code, err.to_string()))
}
