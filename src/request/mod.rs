//! Request module
//!
//! Builds the parameters of one page request.
//!
//! # Overview
//!
//! A `PageRequest` is derived fresh on every iteration of a session from the
//! query, the requested time/ID range, the session's continuation token and
//! the configured field selection. Absent values are omitted, never sent as
//! empty placeholders.

mod builder;
mod types;

pub use builder::{
    RequestParameterBuilder, DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT, MIN_RESULTS,
};
pub use types::{FieldSelection, PageRequest, RequestRange, WireFormat};

#[cfg(test)]
mod tests;
