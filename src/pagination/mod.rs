//! Pagination module
//!
//! Page decoding, response classification and session state.
//!
//! # Overview
//!
//! Every response of a session goes through `classify`, which yields one of
//! four outcomes. Successful pages update the `SessionState`, which carries
//! the continuation token, the counters and the newest result ID from one
//! iteration to the next.

mod classifier;
mod types;

pub use classifier::{classify, error_message, Outcome};
pub use types::{Includes, PageMeta, PageResponse, SessionState};
