use std::fmt;

use hgp_core::errors::{codes, ErrorInfo, HgpError};
use hgp_core::NodeId;
use serde::{Deserialize, Serialize};

/// A single multi-terminal connection, such as a circuit net.
///
/// Member order is preserved as read; duplicates are kept here and collapsed
/// only when the hyperedge is expanded into a clique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hyperedge {
    nodes: Vec<NodeId>,
}

impl Hyperedge {
    /// Creates a hyperedge from its ordered members.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// Creates a hyperedge from raw 1-based node identifiers.
    pub fn from_raw(raw: &[u64]) -> Self {
        Self::new(raw.iter().copied().map(NodeId::from_raw).collect())
    }

    /// Returns the ordered members of the hyperedge.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the number of listed members, duplicates included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the hyperedge lists no members.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the members sorted ascending with duplicates removed.
    pub fn distinct_nodes(&self) -> Vec<NodeId> {
        let mut nodes = self.nodes.clone();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    /// Returns whether the node is a member of this hyperedge.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}

impl fmt::Display for Hyperedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, "]")
    }
}

/// Summary of the distinct node identifiers occurring in a hypergraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpan {
    /// Number of distinct node identifiers.
    pub distinct: usize,
    /// Smallest identifier observed.
    pub min: Option<NodeId>,
    /// Largest identifier observed.
    pub max: Option<NodeId>,
}

/// Validated, read-only hypergraph over the nodes `1..=node_count`.
///
/// Every constructor checks that no hyperedge is empty and that the distinct
/// node ids across all hyperedges are exactly `1..=node_count`. Once built
/// the value is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypergraph {
    node_count: usize,
    hyperedges: Vec<Hyperedge>,
}

impl Hypergraph {
    /// Validates and wraps the provided hyperedges.
    pub fn new(node_count: usize, hyperedges: Vec<Hyperedge>) -> Result<Self, HgpError> {
        if let Some(position) = hyperedges.iter().position(Hyperedge::is_empty) {
            return Err(parse_error(codes::EMPTY_HYPEREDGE, "hyperedge has no members")
                .with_context("edge", position));
        }
        check_node_contiguity(node_count, &hyperedges)?;
        Ok(Self {
            node_count,
            hyperedges,
        })
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of hyperedges.
    pub fn edge_count(&self) -> usize {
        self.hyperedges.len()
    }

    /// Returns the hyperedges in input order.
    pub fn hyperedges(&self) -> &[Hyperedge] {
        &self.hyperedges
    }

    /// Iterates over the node identifiers `1..=node_count`.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> {
        hgp_core::node_range(self.node_count)
    }

    /// Returns whether the identifier names a node of this hypergraph.
    pub fn contains_node(&self, node: NodeId) -> bool {
        (1..=self.node_count as u64).contains(&node.as_raw())
    }

    /// Returns the size of the largest hyperedge, counting distinct members.
    pub fn max_edge_size(&self) -> usize {
        self.hyperedges
            .iter()
            .map(|edge| edge.distinct_nodes().len())
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn from_validated(node_count: usize, hyperedges: Vec<Hyperedge>) -> Self {
        Self {
            node_count,
            hyperedges,
        }
    }
}

/// Checks that the distinct node ids of `hyperedges` are exactly `1..=node_count`.
///
/// All occurrences are sorted and deduplicated, then required to form a
/// contiguous run starting at 1 and ending at `node_count`.
pub fn check_node_contiguity(
    node_count: usize,
    hyperedges: &[Hyperedge],
) -> Result<NodeSpan, HgpError> {
    let mut nodes: Vec<u64> = hyperedges
        .iter()
        .flat_map(|edge| edge.nodes().iter().map(NodeId::as_raw))
        .collect();
    nodes.sort_unstable();
    nodes.dedup();

    let declared = node_count as u64;
    let mut expected = 1u64;
    for &id in &nodes {
        if id != expected {
            let mut err = parse_error(
                codes::NON_CONTIGUOUS_NODES,
                "node ids do not form the contiguous range 1..=node_count",
            )
            .with_context("node_count", node_count)
            .with_context("distinct", nodes.len());
            if expected <= declared {
                err = err.with_context("first_missing", expected);
            }
            if id == 0 || id > declared {
                err = err.with_context("out_of_range", id);
            }
            return Err(err.with_hint("node ids must be numbered 1..=node_count without gaps"));
        }
        expected += 1;
    }
    if expected - 1 != declared {
        return Err(parse_error(
            codes::NON_CONTIGUOUS_NODES,
            "fewer distinct node ids than declared",
        )
        .with_context("node_count", node_count)
        .with_context("distinct", nodes.len())
        .with_context("first_missing", expected));
    }

    Ok(NodeSpan {
        distinct: nodes.len(),
        min: nodes.first().copied().map(NodeId::from_raw),
        max: nodes.last().copied().map(NodeId::from_raw),
    })
}

pub(crate) fn parse_error(code: &str, message: impl Into<String>) -> HgpError {
    HgpError::Parse(ErrorInfo::new(code, message))
}
