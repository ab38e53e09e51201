//! Output module
//!
//! Where each page of search results goes.
//!
//! # Overview
//!
//! A session hands every successful page to one `PageSink`, chosen once from
//! the write mode:
//! - `FileSink` writes each page to its own (optionally gzipped) JSON file
//! - `StandardOutSink` prints items and includes as they arrive
//! - `Accumulator` keeps everything in memory until the session ends

mod accumulate;
mod console;
mod files;
mod sink;
mod types;

pub use accumulate::{Accumulator, ReturnFormat};
pub use console::StandardOutSink;
pub use files::{page_file_stem, FileSink};
pub use sink::{build_sink, PageSink};
pub use types::{OutputConfig, SearchResult, DEFAULT_OUT_BOX};

#[cfg(test)]
mod tests;
