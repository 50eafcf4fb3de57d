#![deny(missing_docs)]
//! Core identifiers, error taxonomy and deterministic seeding shared by the
//! HGP spectral hypergraph partitioner.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{codes, ErrorFamily, ErrorInfo, HgpError};
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier for a node of a hypergraph.
///
/// Node identifiers are 1-based: a validated hypergraph with `n` nodes uses
/// exactly the identifiers `1..=n`. The raw value doubles as the row index of
/// the node in adjacency structures and in the padded Laplacian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// Returns the identifier as an index into 1-based, padded storage.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Creates an identifier from an index into 1-based, padded storage.
    pub fn from_index(index: usize) -> Self {
        Self(index as u64)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Iterates over the node identifiers `1..=node_count` in ascending order.
pub fn node_range(node_count: usize) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator {
    (1..node_count + 1).map(NodeId::from_index)
}
