use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use hgp_core::errors::{codes, ErrorInfo, HgpError};
use hgp_spec::{partition_file, PartitionConfig, SolverKind};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SolverChoice {
    Lanczos,
    Dense,
}

impl From<SolverChoice> for SolverKind {
    fn from(choice: SolverChoice) -> Self {
        match choice {
            SolverChoice::Lanczos => SolverKind::Lanczos,
            SolverChoice::Dense => SolverKind::Dense,
        }
    }
}

#[derive(Args, Debug)]
pub struct PartitionArgs {
    /// Hypergraph file: header `<node_count> <edge_count>`, then one hyperedge per line.
    #[arg(long)]
    pub input: PathBuf,
    /// Optional YAML configuration; defaults apply to omitted fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Destination for the JSON report; stdout when absent.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Overrides the configured eigensolver.
    #[arg(long, value_enum)]
    pub solver: Option<SolverChoice>,
    /// Overrides the configured starting-vector seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Re-check adjacency symmetry and Laplacian row sums during the run.
    #[arg(long)]
    pub verify: bool,
}

pub fn run(args: &PartitionArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => PartitionConfig::from_yaml_file(path)?,
        None => PartitionConfig::default(),
    };
    if let Some(solver) = args.solver {
        config.solver.kind = solver.into();
    }
    if let Some(seed) = args.seed {
        config.solver.seed = seed;
    }
    config.verify_invariants |= args.verify;

    let report = partition_file(&args.input, &config)?;
    let mut body = serde_json::to_string_pretty(&report)?;
    body.push('\n');
    match &args.out {
        Some(path) => {
            write_report(path, &body)?;
            info!(path = %path.display(), "wrote partition report");
        }
        None => std::io::stdout().write_all(body.as_bytes())?,
    }
    Ok(())
}

fn write_report(path: &Path, body: &str) -> Result<(), HgpError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| write_error(parent, err))?;
    }
    fs::write(path, body).map_err(|err| write_error(path, err))
}

fn write_error(path: &Path, err: std::io::Error) -> HgpError {
    HgpError::Io(
        ErrorInfo::new(codes::WRITE_FAILED, "failed to write partition report")
            .with_context("path", path.display())
            .with_context("reason", err),
    )
}
