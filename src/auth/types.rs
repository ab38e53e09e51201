//! Auth configuration types
//!
//! These types represent the credentials after config and environment
//! lookups have been resolved.

use std::fmt;

/// Endpoint that exchanges a consumer key and secret for a bearer token
pub const DEFAULT_TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication (enterprise tier)
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// App-only client credentials, exchanged once for a bearer token
    ClientCredentials {
        /// Token endpoint URL
        token_url: String,
        /// Consumer key
        consumer_key: String,
        /// Consumer secret
        consumer_secret: String,
    },
}

impl AuthConfig {
    /// Client credentials against the default token endpoint
    pub fn client_credentials(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self::ClientCredentials {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Short name for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::ClientCredentials { .. } => "client_credentials",
        }
    }
}

// Secrets stay out of debug output.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
            Self::ClientCredentials { token_url, .. } => f
                .debug_struct("ClientCredentials")
                .field("token_url", token_url)
                .finish_non_exhaustive(),
        }
    }
}
