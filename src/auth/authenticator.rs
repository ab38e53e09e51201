//! Authenticator implementation
//!
//! Handles resolving credentials and applying them to requests.

use super::types::AuthConfig;
use crate::error::{Error, Result};
use crate::pagination::error_message;
use base64::Engine as _;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, info};

/// Credential attached to each request
#[derive(Clone, PartialEq, Eq)]
enum Credential {
    None,
    Basic { username: String, password: String },
    Bearer(String),
}

/// Authenticator applies a resolved credential to HTTP requests
#[derive(Clone)]
pub struct Authenticator {
    credential: Credential,
}

impl Authenticator {
    /// An authenticator that adds nothing
    pub fn none() -> Self {
        Self {
            credential: Credential::None,
        }
    }

    /// Resolve an auth config into a ready credential
    ///
    /// Client credentials are exchanged for a bearer token here, once.
    pub async fn acquire(config: AuthConfig, client: &Client) -> Result<Self> {
        let credential = match config {
            AuthConfig::None => Credential::None,
            AuthConfig::Basic { username, password } => Credential::Basic { username, password },
            AuthConfig::Bearer { token } => Credential::Bearer(token),
            AuthConfig::ClientCredentials {
                token_url,
                consumer_key,
                consumer_secret,
            } => {
                let token =
                    fetch_bearer_token(client, &token_url, &consumer_key, &consumer_secret).await?;
                info!("Obtained bearer token from {}", token_url);
                Credential::Bearer(token)
            }
        };

        Ok(Self { credential })
    }

    /// Apply the credential to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Credential::None => req,
            Credential::Basic { username, password } => req.basic_auth(username, Some(password)),
            Credential::Bearer(token) => req.bearer_auth(token),
        }
    }

    /// Whether a credential will be attached
    pub fn is_authenticated(&self) -> bool {
        self.credential != Credential::None
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::none()
    }
}

impl From<AuthConfig> for Authenticator {
    /// Build an authenticator from credentials that need no exchange
    ///
    /// Client credentials cannot be resolved synchronously and yield an
    /// unauthenticated instance; use [`Authenticator::acquire`] for those.
    fn from(config: AuthConfig) -> Self {
        let credential = match config {
            AuthConfig::Basic { username, password } => Credential::Basic { username, password },
            AuthConfig::Bearer { token } => Credential::Bearer(token),
            AuthConfig::None | AuthConfig::ClientCredentials { .. } => Credential::None,
        };
        Self { credential }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.credential {
            Credential::None => "none",
            Credential::Basic { .. } => "basic",
            Credential::Bearer(_) => "bearer",
        };
        f.debug_struct("Authenticator")
            .field("credential", &kind)
            .finish()
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
}

/// Exchange a consumer key and secret for an app-only bearer token
pub async fn fetch_bearer_token(
    client: &Client,
    token_url: &str,
    consumer_key: &str,
    consumer_secret: &str,
) -> Result<String> {
    let credentials = base64::engine::general_purpose::STANDARD
        .encode(format!("{consumer_key}:{consumer_secret}"));

    debug!("Requesting bearer token from {}", token_url);
    let response = client
        .post(token_url)
        .header(AUTHORIZATION, format!("Basic {credentials}"))
        .header(
            CONTENT_TYPE,
            "application/x-www-form-urlencoded;charset=UTF-8",
        )
        .body("grant_type=client_credentials")
        .send()
        .await
        .map_err(Error::Http)?;

    let status = response.status();
    let body = response.bytes().await.map_err(Error::Http)?;

    if !status.is_success() {
        return Err(Error::auth(format!(
            "Token request failed with status {}: {}",
            status.as_u16(),
            error_message(&body)
        )));
    }

    let token: TokenResponse = serde_json::from_slice(&body)
        .map_err(|e| Error::auth(format!("Token response is not valid JSON: {e}")))?;

    if let Some(kind) = token.token_type.as_deref() {
        if !kind.eq_ignore_ascii_case("bearer") {
            return Err(Error::auth(format!("Unexpected token type: {kind}")));
        }
    }

    token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::auth("Token response has no access_token"))
}
