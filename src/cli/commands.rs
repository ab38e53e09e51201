//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Search Tweets client
#[derive(Parser, Debug)]
#[command(name = "search-tweets")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML) with credentials, endpoint and options
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run each query once, paging through all results
    Search {
        #[command(flatten)]
        args: SearchArgs,

        /// Resume from the stored newest ID and store the new one afterwards
        #[arg(short, long)]
        poll: bool,
    },

    /// Run the queries repeatedly, each cycle picking up after the last
    Poll {
        #[command(flatten)]
        args: SearchArgs,

        /// Minutes between the start of consecutive cycles
        #[arg(long, visible_alias = "poll-interval", default_value = "5")]
        interval: f64,

        /// Stop after this many cycles (runs until interrupted by default)
        #[arg(long)]
        cycles: Option<u32>,
    },
}

/// Request and output options shared by `search` and `poll`
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// A single query, or a .yaml/.json file of queries
    #[arg(short, long)]
    pub query: String,

    /// Start of the search period: YYYYMMDDHHMM, "YYYY-MM-DD HH:MM", ISO 8601, or ##d/##h/##m
    #[arg(short, long)]
    pub start_time: Option<String>,

    /// End of the search period, same formats as --start-time
    #[arg(short, long)]
    pub end_time: Option<String>,

    /// Only results newer than this ID (exclusive)
    #[arg(short = 'i', long)]
    pub since_id: Option<String>,

    /// Only results older than this ID (exclusive)
    #[arg(short, long)]
    pub until_id: Option<String>,

    /// Results per response
    #[arg(short, long = "max")]
    pub max_results: Option<u32>,

    /// Stop after this many requests
    #[arg(short = 'x', long = "exit")]
    pub exit_after: Option<u32>,

    /// Output: files, standard_out (or so, standard), hash, json
    #[arg(short, long)]
    pub write: Option<String>,

    /// Write page files to this directory (implies --write files)
    #[arg(short, long)]
    pub outbox: Option<PathBuf>,

    /// Tag attached to the first query
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Gzip page files
    #[arg(short, long)]
    pub zip: bool,
}
