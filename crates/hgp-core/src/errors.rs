//! Structured error types shared across HGP crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine readable codes carried by [`ErrorInfo::code`].
pub mod codes {
    /// Header line missing or not made of exactly two integers.
    pub const MALFORMED_HEADER: &str = "malformed-header";
    /// A field contained something other than decimal digits.
    pub const INVALID_TOKEN: &str = "invalid-token";
    /// A hyperedge line produced zero tokens.
    pub const EMPTY_HYPEREDGE: &str = "empty-hyperedge";
    /// Number of hyperedge lines differs from the declared edge count.
    pub const EDGE_COUNT_MISMATCH: &str = "edge-count-mismatch";
    /// Distinct node ids are not exactly `1..=node_count`.
    pub const NON_CONTIGUOUS_NODES: &str = "non-contiguous-nodes";
    /// The eigensolver exhausted its restart budget.
    pub const NOT_CONVERGED: &str = "not-converged";
    /// The eigensolver was never run for the request.
    pub const NOT_COMPUTED: &str = "not-computed";
    /// Non-finite values appeared during or after the eigensolve.
    pub const NUMERICAL_ISSUE: &str = "numerical-issue";
    /// Adjacency membership is not symmetric.
    pub const ADJACENCY_ASYMMETRY: &str = "adjacency-asymmetry";
    /// A Laplacian row does not sum to zero.
    pub const NONZERO_ROW_SUM: &str = "nonzero-row-sum";
    /// An operation requires at least one node.
    pub const EMPTY_GRAPH: &str = "empty-graph";
    /// A node identifier lies outside the graph.
    pub const UNKNOWN_NODE: &str = "unknown-node";
    /// An adjacency row lists the node itself.
    pub const SELF_LOOP: &str = "self-loop";
    /// A partition and a graph disagree on their node count.
    pub const SIZE_MISMATCH: &str = "size-mismatch";
    /// A configuration value is out of range.
    pub const INVALID_CONFIG: &str = "invalid-config";
    /// Reading an input file failed.
    pub const READ_FAILED: &str = "read-failed";
    /// Writing an output file failed.
    pub const WRITE_FAILED: &str = "write-failed";
    /// A generator was asked to cover more nodes than its edges can hold.
    pub const INSUFFICIENT_CAPACITY: &str = "insufficient-capacity";
    /// A sparse matrix index lies outside its dimension.
    pub const INDEX_OUT_OF_BOUNDS: &str = "index-out-of-bounds";
    /// Encoding a binary snapshot failed.
    pub const SERIALIZE_BYTES: &str = "serialize-bytes";
    /// Decoding a binary snapshot failed.
    pub const DESERIALIZE_BYTES: &str = "deserialize-bytes";
    /// Encoding a JSON snapshot failed.
    pub const SERIALIZE_JSON: &str = "serialize-json";
    /// Decoding a JSON snapshot failed.
    pub const DESERIALIZE_JSON: &str = "deserialize-json";
    /// A YAML configuration document could not be decoded.
    pub const YAML_DESERIALIZE: &str = "yaml-deserialize";
}

/// Structured payload attached to every [`HgpError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (line numbers, node ids, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Pipeline stage family an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorFamily {
    /// Hypergraph text parsing and validation.
    Parse,
    /// Structural misuse of an already validated graph.
    Graph,
    /// Internal consistency checks (adjacency symmetry, row sums).
    Invariant,
    /// Eigensolver boundary failures.
    Solver,
    /// Configuration loading and validation.
    Config,
    /// File system access.
    Io,
    /// Snapshot encoding and decoding.
    Serde,
}

/// Canonical error type for the HGP partitioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HgpError {
    /// Hypergraph parse and validation errors.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Structural graph errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Internal invariant violations.
    #[error("invariant violation: {0}")]
    Invariant(ErrorInfo),
    /// Eigensolver failures.
    #[error("solver failure: {0}")]
    Solver(ErrorInfo),
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// File system errors.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HgpError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HgpError::Parse(info)
            | HgpError::Graph(info)
            | HgpError::Invariant(info)
            | HgpError::Solver(info)
            | HgpError::Config(info)
            | HgpError::Io(info)
            | HgpError::Serde(info) => info,
        }
    }

    /// Returns the stage family the error belongs to.
    pub fn family(&self) -> ErrorFamily {
        match self {
            HgpError::Parse(_) => ErrorFamily::Parse,
            HgpError::Graph(_) => ErrorFamily::Graph,
            HgpError::Invariant(_) => ErrorFamily::Invariant,
            HgpError::Solver(_) => ErrorFamily::Solver,
            HgpError::Config(_) => ErrorFamily::Config,
            HgpError::Io(_) => ErrorFamily::Io,
            HgpError::Serde(_) => ErrorFamily::Serde,
        }
    }

    /// Returns whether the error carries the provided stable code.
    pub fn has_code(&self, code: &str) -> bool {
        self.info().code == code
    }

    /// Adds a context entry to the payload, preserving the family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value))
    }

    /// Sets a remediation hint on the payload, preserving the family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            HgpError::Parse(info) => HgpError::Parse(f(info)),
            HgpError::Graph(info) => HgpError::Graph(f(info)),
            HgpError::Invariant(info) => HgpError::Invariant(f(info)),
            HgpError::Solver(info) => HgpError::Solver(f(info)),
            HgpError::Config(info) => HgpError::Config(f(info)),
            HgpError::Io(info) => HgpError::Io(f(info)),
            HgpError::Serde(info) => HgpError::Serde(f(info)),
        }
    }
}
