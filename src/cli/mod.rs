//! CLI module for pnlsim.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested; the
//! entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{evaluate_run, export_run, load_and_compare, run_cli, show_catalog};
pub use output::{
    format_baseline, format_catalog, format_comparison, format_presets, print_help, print_report,
    print_version,
};
