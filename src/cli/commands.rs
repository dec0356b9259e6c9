//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shapecast CLI
#[derive(Parser, Debug)]
#[command(name = "shapecast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project definition file (YAML)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer templates and write TypeScript bindings
    Generate {
        /// Output directory (overrides the project's output_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show the aggregated templates without writing bindings
    Templates,

    /// Load, resolve and aggregate the corpus, reporting errors only
    Validate,

    /// Watch the document roots and regenerate on change
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value = "500")]
        interval_ms: u64,

        /// Quiet window required after a change before regenerating
        #[arg(long, default_value = "1000")]
        debounce_ms: u64,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
