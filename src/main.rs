//! pnlsim CLI - P&L scenario simulator
//!
//! Command-line interface for evaluating and exporting scenario comparisons.

use std::process::ExitCode;

use pnlsim::cli::{run_cli, Args};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "pnlsim=debug" } else { "pnlsim=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose());
    run_cli(args)
}
