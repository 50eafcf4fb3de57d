use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use hgp_core::errors::{codes, ErrorInfo, HgpError};
use hgp_core::NodeId;
use tracing::debug;

use crate::hypergraph::{check_node_contiguity, parse_error, Hyperedge, Hypergraph};

/// Reads an entire hypergraph file into memory and parses it.
pub fn read_hypergraph_file(path: impl AsRef<Path>) -> Result<Hypergraph, HgpError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        HgpError::Io(
            ErrorInfo::new(codes::READ_FAILED, "failed to read hypergraph file")
                .with_context("path", path.display())
                .with_context("reason", err),
        )
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read hypergraph file");
    parse_hypergraph_bytes(&bytes).map_err(|err| err.with_context("path", path.display()))
}

/// Parses hypergraph text in the `<node_count> <edge_count>` + one-line-per-hyperedge format.
pub fn parse_hypergraph(text: &str) -> Result<Hypergraph, HgpError> {
    parse_hypergraph_bytes(text.as_bytes())
}

/// Parses raw hypergraph bytes.
///
/// The first non-blank line is the header; every following line is one
/// hyperedge, up to a single optional terminating newline. A blank line
/// after the header is an empty hyperedge and therefore an error, including
/// blank lines at the end of the input. The edge count and node contiguity
/// are checked only once every line has been read.
pub fn parse_hypergraph_bytes(bytes: &[u8]) -> Result<Hypergraph, HgpError> {
    let mut lines = split_lines(bytes)
        .into_iter()
        .skip_while(|line| is_blank(line.bytes));

    let header = lines.next().ok_or_else(|| {
        parse_error(codes::MALFORMED_HEADER, "input contains no header line")
            .with_hint("the first line must read `<node_count> <edge_count>`")
    })?;
    let (node_count, edge_count) = parse_header(&header)?;

    let mut hyperedges = Vec::new();
    for line in lines {
        let tokens = tokenize(&line)?;
        if tokens.is_empty() {
            return Err(
                parse_error(codes::EMPTY_HYPEREDGE, "hyperedge line contains no node ids")
                    .with_context("line", line.number),
            );
        }
        hyperedges.push(Hyperedge::new(
            tokens.into_iter().map(NodeId::from_raw).collect(),
        ));
    }

    if hyperedges.len() != edge_count {
        return Err(parse_error(
            codes::EDGE_COUNT_MISMATCH,
            "number of hyperedge lines differs from the header",
        )
        .with_context("declared", edge_count)
        .with_context("parsed", hyperedges.len()));
    }
    let span = check_node_contiguity(node_count, &hyperedges)?;
    debug!(
        node_count,
        edge_count,
        distinct_nodes = span.distinct,
        "parsed hypergraph"
    );
    Ok(Hypergraph::from_validated(node_count, hyperedges))
}

/// Serializes a hypergraph back into the text format accepted by [`parse_hypergraph`].
pub fn write_hgr(graph: &Hypergraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", graph.node_count(), graph.edge_count());
    for edge in graph.hyperedges() {
        for (idx, node) in edge.nodes().iter().enumerate() {
            if idx > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{node}");
        }
        out.push('\n');
    }
    out
}

struct Line<'a> {
    number: usize,
    bytes: &'a [u8],
}

fn split_lines(bytes: &[u8]) -> Vec<Line<'_>> {
    let mut lines: Vec<Line<'_>> = bytes
        .split(|&b| b == b'\n')
        .enumerate()
        .map(|(idx, raw)| Line {
            number: idx + 1,
            bytes: raw.strip_suffix(b"\r").unwrap_or(raw),
        })
        .collect();
    // A terminating newline leaves one empty trailing segment.
    if bytes.ends_with(b"\n") {
        lines.pop();
    }
    lines
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == b' ')
}

fn parse_header(line: &Line<'_>) -> Result<(usize, usize), HgpError> {
    let tokens = tokenize(line).map_err(|err| {
        parse_error(codes::MALFORMED_HEADER, "header must hold two decimal integers")
            .with_context("line", line.number)
            .with_context("cause", err.info().message.clone())
    })?;
    match tokens.as_slice() {
        &[nodes, edges] => Ok((to_count(nodes, line)?, to_count(edges, line)?)),
        other => Err(parse_error(
            codes::MALFORMED_HEADER,
            "header must hold exactly two integers",
        )
        .with_context("line", line.number)
        .with_context("fields", other.len())),
    }
}

fn to_count(value: u64, line: &Line<'_>) -> Result<usize, HgpError> {
    usize::try_from(value).map_err(|_| {
        parse_error(codes::MALFORMED_HEADER, "header count does not fit in memory")
            .with_context("line", line.number)
            .with_context("value", value)
    })
}

/// Splits a line on single spaces.
///
/// Every space must close a field, so a leading space or two spaces in a row
/// is an empty field and rejected. One trailing space is accepted.
fn tokenize(line: &Line<'_>) -> Result<Vec<u64>, HgpError> {
    let mut tokens = Vec::new();
    let mut acc: Option<u64> = None;
    for (column, &byte) in line.bytes.iter().enumerate() {
        match byte {
            b' ' => match acc.take() {
                Some(value) => tokens.push(value),
                None => {
                    return Err(
                        parse_error(codes::INVALID_TOKEN, "empty field between separators")
                            .with_context("line", line.number)
                            .with_context("column", column + 1)
                            .with_hint("fields are separated by exactly one space"),
                    );
                }
            },
            b'0'..=b'9' => {
                let digit = u64::from(byte - b'0');
                let value = acc
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(|| {
                        parse_error(codes::INVALID_TOKEN, "numeric field overflows")
                            .with_context("line", line.number)
                            .with_context("column", column + 1)
                    })?;
                acc = Some(value);
            }
            other => {
                return Err(parse_error(
                    codes::INVALID_TOKEN,
                    "fields may contain only decimal digits",
                )
                .with_context("line", line.number)
                .with_context("column", column + 1)
                .with_context("byte", format!("{other:#04x}")));
            }
        }
    }
    if let Some(value) = acc {
        tokens.push(value);
    }
    Ok(tokens)
}
