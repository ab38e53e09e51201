//! Authentication module
//!
//! Supports: Basic, Bearer, and app-only Bearer tokens obtained once at
//! startup from a consumer key and secret.
//!
//! The `Authenticator` resolves credentials before the first search request
//! and attaches them to every request after that. Tokens are never refreshed.

mod authenticator;
mod types;

pub use authenticator::{fetch_bearer_token, Authenticator};
pub use types::{AuthConfig, DEFAULT_TOKEN_URL};
