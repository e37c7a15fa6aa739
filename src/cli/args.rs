//! CLI argument parsing.
//!
//! Parsing accepts any iterator of strings so it can be tested without a
//! process environment.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the scenario catalog
    Catalog {
        /// Emit the full catalog as JSON.
        json: bool,
    },
    /// List every variable's presets
    Presets,
    /// Print a starter run document
    Sample,
    /// Evaluate the scenarios of a run document
    Evaluate {
        /// Path to the run YAML file.
        run_path: PathBuf,
        /// Emit results as JSON.
        json: bool,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Evaluate and write the spreadsheet report
    Export {
        /// Path to the run YAML file.
        run_path: PathBuf,
        /// Output directory override.
        out_dir: Option<PathBuf>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether debug-level logging was requested.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        matches!(
            self.command,
            Command::Evaluate { verbose: true, .. } | Command::Export { verbose: true, .. }
        )
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "catalog" => Command::Catalog {
                json: has_flag(&args[2..], "--json"),
            },
            "presets" => Command::Presets,
            "sample" => Command::Sample,
            "evaluate" | "eval" => Self::parse_evaluate_command(args),
            "export" => Self::parse_export_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_evaluate_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'evaluate' command requires a run file path");
            return Command::Help;
        }

        let rest = &args[3..];
        Command::Evaluate {
            run_path: PathBuf::from(&args[2]),
            json: has_flag(rest, "--json"),
            verbose: has_flag(rest, "-v") || has_flag(rest, "--verbose"),
        }
    }

    fn parse_export_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'export' command requires a run file path");
            return Command::Help;
        }

        let mut out_dir = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--out" | "-o" => {
                    if i + 1 < args.len() {
                        out_dir = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Export {
            run_path: PathBuf::from(&args[2]),
            out_dir,
            verbose,
        }
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}
