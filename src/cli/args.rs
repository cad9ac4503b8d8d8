//! Command-line argument parsing

use crate::models::config::OutputFormat;
use crate::models::impact::ChangeKind;
use crate::models::plan::ChangeType;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Ripple - dependency impact analysis and safe change planning for JS/TS sources
#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map import dependencies, score risk and plan safe changes in JavaScript/TypeScript trees")]
#[command(long_about = "Ripple scans a JavaScript/TypeScript source tree, builds an import/export dependency graph, \
scores each file's risk from its fan-in, fan-out and location, predicts the blast radius of a prospective edit, \
and drives staged, rollback-capable change plans.")]
#[command(after_help = "EXAMPLES:

Analysis:
    # Analyze ./src and print a summary
    ripple analyze

    # Analyze another tree as JSON
    ripple --path web/src --output json analyze

    # Write a CSV report
    ripple --output csv --output-file report.csv analyze

Impact:
    # Who breaks if this file is deleted?
    ripple impact src/utils/date.ts --change delete

Planning:
    # Build a plan for renaming a file
    ripple plan src/lib/api.ts --change rename --description \"split client\"

    # Build and run a plan, rolling back if a step fails
    ripple plan src/lib/api.ts --change modify --execute --rollback-on-failure

Validation:
    # Check proposed content before writing it
    ripple validate src/pages/home.tsx --change modify --content-file /tmp/home.tsx

Graph:
    # Export a Graphviz graph
    ripple graph --dot > deps.dot

Configuration:
    # Create a default .ripple.toml
    ripple init
")]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Source root to scan
    #[arg(short, long, global = true, value_name = "PATH", help = "Root of the source tree to scan (defaults to ./src)")]
    pub path: Option<PathBuf>,

    /// File extensions to analyze
    #[arg(long = "ext", global = true, value_name = "EXT", help = "File extension to analyze (repeatable, e.g. --ext .ts --ext .tsx)")]
    pub extensions: Vec<String>,

    /// Ignore substrings
    #[arg(short, long, global = true, value_name = "PATTERN", help = "Skip path segments containing this substring (repeatable)")]
    pub ignore: Vec<String>,

    #[arg(long, global = true, help = "Follow symbolic links while scanning (loops are reported and skipped)")]
    pub follow_links: bool,

    #[arg(long, global = true, value_name = "N", help = "Maximum number of concurrent file reads (defaults to the CPU count)")]
    pub workers: Option<usize>,

    /// Output format (text, json, csv)
    #[arg(short, long, global = true, value_enum, help = "Output format: 'text' for people, 'json' for tools, 'csv' for spreadsheets")]
    pub output: Option<OutputFormatArg>,

    #[arg(long, global = true, value_name = "FILE", help = "Write output to a file instead of stdout")]
    pub output_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Only print results and errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Print debug logging and extra detail")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_colors: bool,

    #[arg(long, global = true, help = "Disable progress bars")]
    pub no_progress: bool,

    #[arg(short, long, global = true, value_name = "FILE", help = "Configuration file (defaults to .ripple.toml in the current directory)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Analyze the tree and report every file's dependencies and risk
    Analyze,

    /// Predict the files affected by changing one file
    Impact {
        /// File to change, as a path under the scan root
        target: String,

        #[arg(long, value_enum, default_value_t = ChangeKindArg::Modify)]
        change: ChangeKindArg,
    },

    /// Create a change plan and optionally run it
    Plan {
        /// File to change, as a path under the scan root
        target: String,

        #[arg(long, value_enum)]
        change: ChangeTypeArg,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Run every step after creating the plan
        #[arg(long)]
        execute: bool,

        /// Roll the plan back when a step fails
        #[arg(long, requires = "execute")]
        rollback_on_failure: bool,
    },

    /// Check proposed content for a file without touching it
    Validate {
        target: String,

        #[arg(long, value_enum, default_value_t = ChangeTypeArg::Modify)]
        change: ChangeTypeArg,

        /// File holding the proposed content (defaults to the target itself)
        #[arg(long, value_name = "FILE")]
        content_file: Option<PathBuf>,
    },

    /// Print graph statistics, or the whole graph as Graphviz DOT
    Graph {
        #[arg(long)]
        dot: bool,
    },

    /// Write a default .ripple.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChangeKindArg {
    Modify,
    Delete,
    Rename,
}

impl From<ChangeKindArg> for ChangeKind {
    fn from(arg: ChangeKindArg) -> Self {
        match arg {
            ChangeKindArg::Modify => ChangeKind::Modify,
            ChangeKindArg::Delete => ChangeKind::Delete,
            ChangeKindArg::Rename => ChangeKind::Rename,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChangeTypeArg {
    Modify,
    Delete,
    Rename,
    Move,
    Add,
}

impl From<ChangeTypeArg> for ChangeType {
    fn from(arg: ChangeTypeArg) -> Self {
        match arg {
            ChangeTypeArg::Modify => ChangeType::Modify,
            ChangeTypeArg::Delete => ChangeType::Delete,
            ChangeTypeArg::Rename => ChangeType::Rename,
            ChangeTypeArg::Move => ChangeType::Move,
            ChangeTypeArg::Add => ChangeType::Add,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
