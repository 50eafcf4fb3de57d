use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hgp_graph::{canonical_hash, check_node_contiguity, read_hypergraph_file};
use serde_json::json;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Hypergraph file to validate.
    #[arg(long)]
    pub input: PathBuf,
    /// Print every hyperedge after the summary line.
    #[arg(long)]
    pub edges: bool,
    /// Emit the summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let graph = read_hypergraph_file(&args.input)?;
    let span = check_node_contiguity(graph.node_count(), graph.hyperedges())?;

    if args.json {
        let summary = json!({
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "distinct_nodes": span.distinct,
            "max_edge_size": graph.max_edge_size(),
            "graph_hash": canonical_hash(&graph),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "node count: {}, edge count: {}",
            graph.node_count(),
            graph.edge_count()
        );
    }
    if args.edges {
        for edge in graph.hyperedges() {
            println!("{edge}");
        }
    }
    Ok(())
}
