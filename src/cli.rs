// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskplan",
    version,
    about = "Infer task dependencies, order them, and simulate running the plan.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML) holding `[[task]]` entries.
    #[arg(long, value_name = "PATH", default_value = "Taskplan.toml")]
    pub config: String,

    /// Generate and print the plan, but don't execute it.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the semantic classifier and use the keyword heuristic only.
    #[arg(long)]
    pub keywords_only: bool,

    /// Override `[execution].step_delay_ms`.
    #[arg(long, value_name = "MS")]
    pub step_delay_ms: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKPLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
