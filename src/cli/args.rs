//! Command line argument parsing for the Sieve CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::document::DocId;

/// Sieve - an in-memory TF-IDF document search index
#[derive(Parser, Debug, Clone)]
#[command(name = "sieve")]
#[command(about = "Rank a JSON Lines corpus against keyword queries with TF-IDF")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SieveArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SieveArgs {
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
    /// Rank the corpus against a query
    Search(SearchArgs),

    /// Show which query words a document contains
    Match(MatchArgs),

    /// Remove documents with identical vocabularies
    Dedup(DedupArgs),

    /// Run a file of queries in parallel
    Batch(BatchArgs),
}

/// Options shared by every command that builds an index from a corpus.
#[derive(Parser, Debug, Clone)]
pub struct CorpusArgs {
    /// JSON Lines corpus, one `{"id", "text", "status"?, "ratings"?}` per line
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Space-separated stop words
    #[arg(short = 's', long, default_value = "")]
    pub stop_words: String,

    /// Index configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Query string; words prefixed with '-' exclude documents
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    pub query: String,

    /// Only rank documents with this status
    #[arg(long, default_value = "actual")]
    pub status: String,

    /// Enable parallel search processing
    #[arg(long)]
    pub parallel: bool,

    /// Split the hits into pages of this size
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for matching a single document
#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Query string
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    pub query: String,

    /// Document id
    #[arg(value_name = "ID")]
    pub id: DocId,

    /// Enable parallel matching
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for duplicate removal
#[derive(Parser, Debug, Clone)]
pub struct DedupArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

/// Arguments for batch queries
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// File with one query per line
    #[arg(value_name = "QUERIES_FILE")]
    pub queries_file: PathBuf,

    /// Number of worker threads
    #[arg(short, long, default_value_t = num_cpus::get())]
    pub threads: usize,
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
