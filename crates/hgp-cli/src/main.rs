use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    check::{self, CheckArgs},
    partition::{self, PartitionArgs},
};
use hgp_core::HgpError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "hgp", version, about = "Spectral hypergraph bisection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bisect a hypergraph file along its Fiedler vector.
    Partition(PartitionArgs),
    /// Parse and validate a hypergraph file without partitioning it.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    // RUST_LOG overrides the default `info` level; output goes to stderr so
    // JSON on stdout stays machine readable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Partition(args) => partition::run(&args),
        Command::Check(args) => check::run(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(err.as_ref());
            ExitCode::FAILURE
        }
    }
}

fn report_error(err: &(dyn Error + 'static)) {
    match err.downcast_ref::<HgpError>() {
        Some(hgp) => match serde_json::to_string(hgp) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{hgp}"),
        },
        None => eprintln!("error: {err}"),
    }
}
