use std::collections::BTreeMap;
use std::fmt;

use hgp_core::errors::{codes, ErrorInfo, HgpError};
use hgp_core::NodeId;
use hgp_graph::Hypergraph;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Side of a bisection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Part {
    /// Label 0: components at or below the median.
    Zero,
    /// Label 1: components strictly above the median.
    One,
}

impl Part {
    /// Returns the numeric label, 0 or 1.
    pub fn label(self) -> u8 {
        match self {
            Part::Zero => 0,
            Part::One => 1,
        }
    }
}

impl From<Part> for u8 {
    fn from(part: Part) -> Self {
        part.label()
    }
}

impl TryFrom<u8> for Part {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Part::Zero),
            1 => Ok(Part::One),
            other => Err(format!("partition label must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Assignment of every node `1..=node_count` to one of two parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition {
    labels: Vec<Part>,
}

impl Partition {
    /// Wraps labels listed in node order, `labels[0]` belonging to node 1.
    pub fn from_labels(labels: Vec<Part>) -> Self {
        Self { labels }
    }

    /// Returns the number of labelled nodes.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the labels in node order.
    pub fn labels(&self) -> &[Part] {
        &self.labels
    }

    /// Returns the part of a node, `None` for ids outside `1..=node_count`.
    pub fn part(&self, node: NodeId) -> Option<Part> {
        node.index()
            .checked_sub(1)
            .and_then(|offset| self.labels.get(offset))
            .copied()
    }

    /// Iterates over `(node, part)` in node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Part)> + '_ {
        hgp_core::node_range(self.labels.len()).zip(self.labels.iter().copied())
    }

    /// Returns the nodes assigned to `part` in ascending order.
    pub fn members(&self, part: Part) -> Vec<NodeId> {
        self.iter()
            .filter(|&(_, p)| p == part)
            .map(|(node, _)| node)
            .collect()
    }

    /// Returns the number of nodes in parts 0 and 1.
    pub fn part_sizes(&self) -> [usize; 2] {
        let ones = self.labels.iter().filter(|&&p| p == Part::One).count();
        [self.labels.len() - ones, ones]
    }

    /// Returns the labels keyed by node id.
    pub fn to_map(&self) -> BTreeMap<NodeId, u8> {
        self.iter().map(|(node, part)| (node, part.label())).collect()
    }

    /// Counts hyperedges with members in both parts.
    pub fn cut_size(&self, graph: &Hypergraph) -> Result<usize, HgpError> {
        if graph.node_count() != self.labels.len() {
            return Err(HgpError::Graph(
                ErrorInfo::new(codes::SIZE_MISMATCH, "partition does not cover the hypergraph")
                    .with_context("partition_nodes", self.labels.len())
                    .with_context("graph_nodes", graph.node_count()),
            ));
        }
        let mut cut = 0;
        for edge in graph.hyperedges() {
            let mut seen = [false; 2];
            for &node in edge.nodes() {
                if let Some(part) = self.part(node) {
                    seen[usize::from(part.label())] = true;
                }
            }
            if seen[0] && seen[1] {
                cut += 1;
            }
        }
        Ok(cut)
    }
}

/// A partition together with the threshold that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bisection {
    /// Resulting labels.
    pub partition: Partition,
    /// Lower median of the input components.
    pub median: f64,
    /// Number of components exactly equal to the median.
    pub ties: usize,
}

/// Returns the lower median, `sorted[(n - 1) / 2]`.
///
/// Empty input is an error and so is any NaN, since NaN has no place in
/// the ordering.
pub fn median(values: &[f64]) -> Result<f64, HgpError> {
    if values.is_empty() {
        return Err(HgpError::Graph(ErrorInfo::new(
            codes::EMPTY_GRAPH,
            "median of an empty vector is undefined",
        )));
    }
    if let Some(position) = values.iter().position(|v| v.is_nan()) {
        return Err(HgpError::Solver(
            ErrorInfo::new(codes::NUMERICAL_ISSUE, "vector component is NaN")
                .with_context("node", position + 1),
        ));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted[(sorted.len() - 1) / 2])
}

/// Splits nodes by comparing each component against the lower median.
///
/// `components[i]` belongs to node `i + 1`. Components at or below the
/// median get label 0, the rest label 1, so ties always land in part 0.
pub fn bisect(components: &[f64]) -> Result<Bisection, HgpError> {
    let threshold = median(components)?;
    let labels: Vec<Part> = components
        .iter()
        .map(|&value| if value <= threshold { Part::Zero } else { Part::One })
        .collect();
    let ties = components.iter().filter(|&&value| value == threshold).count();
    let partition = Partition::from_labels(labels);
    let [zeros, ones] = partition.part_sizes();
    debug!(median = threshold, ties, zeros, ones, "bisected at median");
    Ok(Bisection {
        partition,
        median: threshold,
        ties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_median_for_even_lengths() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[5.0]).unwrap(), 5.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
    }

    #[test]
    fn median_rejects_nan_and_empty() {
        assert!(median(&[]).unwrap_err().has_code(codes::EMPTY_GRAPH));
        let err = median(&[0.0, f64::NAN]).unwrap_err();
        assert!(err.has_code(codes::NUMERICAL_ISSUE));
        assert_eq!(err.info().context["node"], "2");
    }

    #[test]
    fn labels_serialize_as_integers() {
        let partition = Partition::from_labels(vec![Part::Zero, Part::One]);
        let json = serde_json::to_string(&partition).unwrap();
        assert_eq!(json, "[0,1]");
        let back: Partition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, partition);
        assert!(serde_json::from_str::<Partition>("[2]").is_err());
    }
}
