//! Query module
//!
//! Search queries and the files they are loaded from.
//!
//! # Overview
//!
//! The query module provides:
//! - `Query` - one search expression with an optional tag
//! - `QuerySet` - an ordered list of queries, loadable from YAML or JSON files

mod loader;
mod types;

pub use loader::{load_queries, load_queries_from_str, QueryFormat};
pub use types::{Query, QuerySet};

#[cfg(test)]
mod tests;
