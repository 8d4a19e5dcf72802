//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// degreeplan - Degree requirement tracking and progress auditing.
#[derive(Debug, Parser)]
#[command(name = "degreeplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show progress for every configured program (default)
    Status(StatusArgs),

    /// Show the requirement tree with completion markers
    Tree(TreeArgs),

    /// Mark courses as completed or planned
    Mark(MarkArgs),

    /// Remove completed or planned marks
    Unmark(UnmarkArgs),

    /// Flip completed or planned marks
    Toggle(UnmarkArgs),

    /// Validate program files
    Lint(LintArgs),

    /// Export a progress report
    Export(ExportArgs),

    /// Print the JSON Schema for program files
    Schema,

    /// Create a planner configuration for this directory
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Count planned courses as completed
    #[arg(long)]
    pub projected: bool,

    /// Show only the named program
    #[arg(long, value_name = "NAME")]
    pub program: Option<String>,
}

/// Arguments for the `tree` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TreeArgs {
    /// Count planned courses as completed
    #[arg(long)]
    pub projected: bool,

    /// Show only the named program
    #[arg(long, value_name = "NAME")]
    pub program: Option<String>,
}

/// Arguments for the `mark` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MarkArgs {
    /// Course codes (or flexible requirement text) to mark
    #[arg(required = true, value_name = "CODE")]
    pub codes: Vec<String>,

    /// Mark as planned instead of completed
    #[arg(long, conflicts_with = "grade")]
    pub planned: bool,

    /// Record a final grade (A, B, C, D, F, P, W)
    #[arg(long, value_name = "GRADE")]
    pub grade: Option<String>,
}

/// Arguments for the `unmark` and `toggle` commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UnmarkArgs {
    /// Course codes (or flexible requirement text)
    #[arg(required = true, value_name = "CODE")]
    pub codes: Vec<String>,

    /// Operate on planned marks instead of completed ones
    #[arg(long)]
    pub planned: bool,
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LintArgs {
    /// Output format: human, json
    #[arg(long, default_value = "human", value_parser = ["human", "json"])]
    pub format: String,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl Default for LintArgs {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            strict: false,
        }
    }
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExportArgs {
    /// Output format: json, csv
    #[arg(long, default_value = "json", value_parser = ["json", "csv"])]
    pub format: String,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Count planned courses as completed
    #[arg(long)]
    pub projected: bool,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            output: None,
            projected: false,
        }
    }
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Program file for the major
    #[arg(long, value_name = "PATH")]
    pub major: PathBuf,

    /// Program file for a minor (repeatable)
    #[arg(long = "minor", value_name = "PATH")]
    pub minors: Vec<PathBuf>,

    /// Student name shown in reports
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
