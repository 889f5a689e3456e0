use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "elector-dedupe")]
#[command(about = "Find duplicate electors between 2025 and 2002 roll snapshots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose diagnostic output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare both snapshots and export the duplicate report
    Run {
        /// Excel workbook with 2025_LIST and 2002_LIST sheets
        /// (prompted interactively when omitted)
        input: Option<PathBuf>,

        /// Similarity threshold 0-100 (default: configured value, 85)
        #[arg(short, long)]
        threshold: Option<i64>,

        /// Output report path (default: <input>_duplicates_<timestamp>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a workbook without running the comparison
    Check {
        /// Excel workbook to inspect
        #[arg(required = true)]
        input: PathBuf,
    },

    /// Show or edit configuration
    Config {
        /// Set the default similarity threshold (0-100)
        #[arg(long)]
        set_threshold: Option<i64>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
