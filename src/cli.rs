// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::TaskId;

/// Command-line arguments for `taskplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskplan",
    version,
    about = "Schedule dependent tasks, find the critical path and track productivity.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Taskplan.toml")]
    pub project: String,

    /// Print the analysis and exit without executing any task.
    #[arg(long)]
    pub dry_run: bool,

    /// Start task for a shortest-path query (requires `--to`).
    #[arg(long, value_name = "ID", requires = "to")]
    pub from: Option<TaskId>,

    /// End task for a shortest-path query (requires `--from`).
    #[arg(long, value_name = "ID", requires = "from")]
    pub to: Option<TaskId>,

    /// Execute only this task instead of the whole project.
    #[arg(long, value_name = "ID")]
    pub task: Option<TaskId>,

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
