//! CLI module
//!
//! Command-line interface for running searches.
//!
//! # Commands
//!
//! - `search` - Run each query once, paging through all results
//! - `poll` - Re-run the queries on an interval, resuming from the newest ID

mod commands;
mod runner;

#[cfg(test)]
mod tests;

pub use commands::{Cli, Commands, SearchArgs};
pub use runner::{
    apply_overrides, build_queries, build_range, load_config, newest_of, render_result,
    run_queries, Runner, DEFAULT_CONFIG_PATH,
};
