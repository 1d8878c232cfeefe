//! CLI parse: clap types for graft. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Graft CLI - stitch per-project report fragments into one module tree
#[derive(Parser)]
#[command(name = "graft")]
#[command(about = "Stitches per-project dependency report fragments into a single module tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Working directory holding the report documents (overrides config)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Merge pending fragments into their parents
    Aggregate {
        /// Project manifest (.toml or .json), top-level project first
        #[arg(long)]
        manifest: PathBuf,
        /// Repeat passes until nothing more can be merged
        #[arg(long)]
        until_stable: bool,
        /// Report what would be merged without changing any file
        #[arg(long, conflicts_with = "until_stable")]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the root document and pending fragments
    Status {
        /// Project manifest; when given, also show what the next pass would do
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the merged module tree
    Tree {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
