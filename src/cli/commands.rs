//! CLI command handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{error, info};

use super::output::{
    format_catalog, format_presets, print_help, print_report, print_version,
};
use super::{Args, Command};
use crate::catalog::catalog;
use crate::config::{sample_yaml, RunConfig};
use crate::error::PnlResult;
use crate::report::build_report;
use crate::report::export::write_report;
use crate::scenarios::{compare, NamedResult};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Catalog { json } => show_catalog(json),
        Command::Presets => {
            print!("{}", format_presets(catalog()));
            ExitCode::SUCCESS
        }
        Command::Sample => {
            print!("{}", sample_yaml());
            ExitCode::SUCCESS
        }
        Command::Evaluate {
            run_path,
            json,
            verbose,
        } => evaluate_run(&run_path, json, verbose),
        Command::Export {
            run_path,
            out_dir,
            verbose: _,
        } => export_run(&run_path, out_dir),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Print the catalog, as a summary or as JSON.
#[must_use]
pub fn show_catalog(json: bool) -> ExitCode {
    if !json {
        print!("{}", format_catalog(catalog()));
        return ExitCode::SUCCESS;
    }
    match serde_json::to_string_pretty(catalog()) {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Load a run document and evaluate its scenarios.
///
/// # Errors
///
/// Returns configuration, input and I/O errors.
pub fn load_and_compare(path: &Path) -> PnlResult<(RunConfig, Vec<NamedResult>)> {
    let config = RunConfig::load(path)?;
    let scenarios = config.resolve_scenarios()?;
    for s in &scenarios {
        s.var_values.warn_out_of_range(catalog());
    }
    let results = compare(&scenarios, &config.global_params)?;
    info!(path = %path.display(), scenarios = results.len(), "run evaluated");
    Ok((config, results))
}

/// Evaluate a run document and print the comparison.
#[must_use]
pub fn evaluate_run(path: &Path, json: bool, verbose: bool) -> ExitCode {
    let results = match load_and_compare(path) {
        Ok((_, results)) => results,
        Err(e) => {
            error!(path = %path.display(), error = %e, "evaluation failed");
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if json {
        return match serde_json::to_string_pretty(&results) {
            Ok(s) => {
                println!("{s}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from(1)
            }
        };
    }

    print_report(&build_report(&results), verbose);
    ExitCode::SUCCESS
}

/// Evaluate a run document and write the spreadsheet report.
#[must_use]
pub fn export_run(path: &Path, out_dir: Option<PathBuf>) -> ExitCode {
    let outcome = load_and_compare(path).and_then(|(config, results)| {
        let mut options = config.export;
        if let Some(dir) = out_dir {
            options.directory = dir;
        }
        write_report(&build_report(&results), &options)
    });

    match outcome {
        Ok(written) => {
            println!("✓ Report written: {}", written.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "export failed");
            eprintln!("✗ Export failed: {e}");
            ExitCode::from(1)
        }
    }
}
