#![deny(missing_docs)]

//! Hypergraph model, `.hgr`-style text parser and clique expansion for the
//! HGP spectral partitioner.
//!
//! A [`Hypergraph`] can only be obtained through validation: either by
//! parsing text ([`parse_hypergraph`], [`read_hypergraph_file`]), by
//! [`Hypergraph::new`], or by restoring a snapshot. Downstream stages rely on
//! the node ids being exactly `1..=node_count`.

mod clique;
mod generators;
mod hash;
mod hypergraph;
mod parser;
mod serialization;

pub use clique::{expand_cliques, AdjacencyList};
pub use generators::{gen_random_hypergraph, path_hypergraph};
pub use hash::canonical_hash;
pub use hypergraph::{check_node_contiguity, Hyperedge, Hypergraph, NodeSpan};
pub use parser::{parse_hypergraph, parse_hypergraph_bytes, read_hypergraph_file, write_hgr};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
