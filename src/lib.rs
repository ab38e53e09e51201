// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Search Tweets
//!
//! A client for paginated Tweet search. Given a query and optional time or
//! ID bounds, it walks every page the API will serve, staying under the
//! request rate limit and riding out transient failures.
//!
//! ## Features
//!
//! - **Auth**: bearer token, consumer key/secret exchange, or basic auth
//! - **Throttled paging**: one request per interval, fixed cooldowns on 429 and 5xx
//! - **Output sinks**: stdout lines, per-page files (optionally gzipped), or in-memory results
//! - **Polling**: resume from the newest ID seen by the previous run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use search_tweets::auth::Authenticator;
//! use search_tweets::engine::PaginationEngine;
//! use search_tweets::http::HttpClient;
//! use search_tweets::output::{build_sink, OutputConfig};
//! use search_tweets::query::Query;
//! use search_tweets::request::RequestRange;
//! use search_tweets::{SearchConfig, WriteMode};
//!
//! #[tokio::main]
//! async fn main() -> search_tweets::Result<()> {
//!     let config = SearchConfig::from_file("config/.config.yaml")?;
//!     let http_config = config.http_config()?;
//!     let client = http_config.build_client()?;
//!     let auth = Authenticator::acquire(config.resolve_auth()?, &client).await?;
//!     let transport = HttpClient::from_parts(client, http_config, auth)?;
//!
//!     let engine = PaginationEngine::new(transport, config.parameter_builder())
//!         .with_config(config.engine_config()?);
//!     let mut sink = build_sink(WriteMode::Hash, &OutputConfig::default())?;
//!     let outcome = engine
//!         .run(&Query::new("snow has:media"), &RequestRange::new(), sink.as_mut())
//!         .await?;
//!
//!     println!("newest id: {:?}", outcome.newest_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                 CLI: search / poll  (config, queries)         │
//! └───────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬────────────┬──────┴───────┬────────────┬───────────┐
//! │  Auth    │  Request   │  Engine      │ Pagination │  Output   │
//! ├──────────┼────────────┼──────────────┼────────────┼───────────┤
//! │ Bearer   │ Params     │ Throttle     │ Classify   │ Stdout    │
//! │ Exchange │ Range      │ Cooldowns    │ Page/meta  │ Files/gz  │
//! │ Basic    │ Fields     │ Request cap  │ Session    │ Hash/JSON │
//! └──────────┴────────────┴──────────────┴────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Timestamp parsing and formatting
pub mod time;

/// Credential resolution and bearer token exchange
pub mod auth;

/// HTTP transport and request throttle
pub mod http;

/// Search products and their endpoints
pub mod endpoint;

/// Queries and query files
pub mod query;

/// Page request construction
pub mod request;

/// Response classification and session state
pub mod pagination;

/// Page sinks
pub mod output;

/// Pagination engine
pub mod engine;

/// Newest-ID persistence for polling
pub mod state;

/// Configuration file
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, ResultExt};
pub use types::*;

// Re-export commonly used types
pub use config::SearchConfig;
pub use engine::{PaginationEngine, SessionOutcome};
pub use query::{Query, QuerySet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
