//! CLI output formatting.
//!
//! Table builders return strings so they can be asserted on; the `print_*`
//! wrappers write them to stdout.

use std::fmt::Write;

use crate::catalog::{Catalog, VariableId};
use crate::report::{DeltaTone, Report, COMPARISON_UNIT};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    println!("pnlsim {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"pnlsim - P&L scenario simulator for price, volume and cost levers

USAGE:
    pnlsim <COMMAND> [OPTIONS]

COMMANDS:
    catalog                     Show variables, global parameters and baseline
        --json                  Emit the full catalog as JSON

    presets                     List every variable's preset options

    sample                      Print a starter run document

    evaluate <run.yaml>         Evaluate the scenarios of a run document
        --json                  Emit results as JSON
        -v, --verbose           Enable debug logging

    export <run.yaml>           Evaluate and write the .xlsx comparison report
        -o, --out <DIR>         Override the export directory
        -v, --verbose           Enable debug logging

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    pnlsim sample > run.yaml
    pnlsim evaluate run.yaml
    pnlsim export run.yaml --out reports

LOGGING:
    Set RUST_LOG (e.g. RUST_LOG=pnlsim=debug) to control log output.
"
    );
}

/// Comparison table with one row per scenario.
#[must_use]
pub fn format_comparison(report: &Report) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<16}", "Scenario");
    for id in VariableId::ALL {
        let _ = write!(out, "{:>10}", id.short_label());
    }
    let _ = writeln!(
        out,
        "{:>10}{:>9}{:>9}{:>7}{:>7}{:>7}",
        "EBITDA", "Change", "EBITDA%", "GP%", "FrGP%", "OPM%"
    );

    for row in &report.comparison {
        let _ = write!(out, "{:<16}", truncate(&row.name, 15));
        for value in row.contributions {
            let _ = write!(out, "{value:>10.1}");
        }
        let sign = match row.change_tone {
            DeltaTone::Positive => "+",
            DeltaTone::Negative => "",
        };
        let _ = writeln!(
            out,
            "{:>10.0}{:>9}{:>9.1}{:>7.1}{:>7.1}{:>7.1}",
            row.ebitda_projected,
            format!("{sign}{:.0}", row.ebitda_change),
            row.ebitda_pct,
            row.gp_pct,
            row.franchise_gp_pct,
            row.op_margin_pct
        );
    }
    out
}

/// Baseline summary table (KRW million).
#[must_use]
pub fn format_baseline(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20}{:>14}{:>14}{:>12}",
        "Line item", "Prior", "Planned", "Delta"
    );
    for row in &report.baseline {
        let marker = if row.highlight {
            "▶"
        } else if row.bold {
            "•"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{marker}{:<19}{:>14.0}{:>14.0}{:>12.0}",
            row.label, row.prior, row.planned, row.delta
        );
    }
    out
}

/// Print the comparison report.
pub fn print_report(report: &Report, verbose: bool) {
    println!("{RULE}");
    println!(
        "Scenario Comparison (currency in units of {COMPARISON_UNIT:.0} KRW)"
    );
    println!("{RULE}\n");
    print!("{}", format_comparison(report));

    if verbose {
        println!("\n{RULE}");
        println!("P&L Baseline (KRW million)");
        println!("{RULE}\n");
        print!("{}", format_baseline(report));
    }
}

/// Catalog overview.
#[must_use]
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Variables:");
    for var in &catalog.variables {
        let _ = writeln!(
            out,
            "  {:<22} {:<16} base {:>16.0} KRW  range [{:.0}, {:.0}]",
            var.id.as_str(),
            var.label,
            var.base_impact,
            var.custom_range.min,
            var.custom_range.max
        );
    }
    let _ = writeln!(out, "\nGlobal parameters:");
    for p in &catalog.global_params {
        let _ = writeln!(
            out,
            "  {:<22} default {:>7} [{} – {}]",
            p.id.as_str(),
            p.default,
            p.min,
            p.max
        );
    }
    let r = &catalog.ratios;
    let _ = writeln!(out, "\nPublished ratios (prior → planned):");
    let _ = writeln!(out, "  GP%            {:>6.2} → {:>6.2}", r.gp.prior, r.gp.planned);
    let _ = writeln!(
        out,
        "  Franchise GP%  {:>6.2} → {:>6.2}",
        r.gp_franchise.prior, r.gp_franchise.planned
    );
    let _ = writeln!(
        out,
        "  EBITDA%        {:>6.2} → {:>6.2}",
        r.ebitda_pct.prior, r.ebitda_pct.planned
    );
    let _ = writeln!(
        out,
        "  OPM%           {:>6.2} → {:>6.2}",
        r.op_margin.prior, r.op_margin.planned
    );
    out
}

/// Preset listing.
#[must_use]
pub fn format_presets(catalog: &Catalog) -> String {
    let mut out = String::new();
    for var in &catalog.variables {
        let _ = writeln!(out, "{} ({})", var.label, var.id);
        for p in &var.presets {
            let flag = if p.is_default { "*" } else { " " };
            let _ = writeln!(
                out,
                "  {flag} {:<13} {:>9.1}억  {}",
                p.id,
                p.value / COMPARISON_UNIT,
                p.detail
            );
        }
    }
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
