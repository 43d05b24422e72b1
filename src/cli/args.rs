//! Command line argument parsing for the querywise CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::schema::CollectionKind;

/// querywise - inspect search query quality and reconstruction
#[derive(Parser, Debug, Clone)]
#[command(name = "querywise")]
#[command(about = "Score search queries and reconstruct repaired queries from search results")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct QuerywiseArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", global = true, default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Analyzer options file (JSON)
    #[arg(short, long, global = true, env = "QUERYWISE_OPTIONS")]
    pub options: Option<PathBuf>,

    /// Collection the results come from
    #[arg(short, long, global = true, default_value = "content")]
    pub collection: CollectionArg,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl QuerywiseArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze one query against a saved search result
    Analyze(AnalyzeArgs),

    /// Replay a JSONL search log and report what would be tracked
    Replay(ReplayArgs),

    /// Show the backend search parameters of the collection
    Params,
}

/// Arguments for analyzing a single query
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Raw query as typed by the user
    #[arg(short = 'Q', long)]
    pub query: String,

    /// Search result file (JSON)
    #[arg(short, long)]
    pub result: PathBuf,
}

/// Arguments for replaying a search log
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Log file with one {"query", "result"} object per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of tracked queries to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Collections selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionArg {
    Content,
    Questions,
}

impl From<CollectionArg> for CollectionKind {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Content => CollectionKind::Content,
            CollectionArg::Questions => CollectionKind::Questions,
        }
    }
}
