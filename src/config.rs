//! Configuration for the search client
//!
//! This module contains the structures loaded from the YAML config file and
//! the conversions into the settings each component takes.

use crate::auth::{AuthConfig, DEFAULT_TOKEN_URL};
use crate::endpoint::EndpointConfig;
use crate::engine::{EngineConfig, RetryPolicy};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::output::{OutputConfig, DEFAULT_OUT_BOX};
use crate::request::{FieldSelection, RequestParameterBuilder, DEFAULT_MAX_RESULTS};
use crate::state::DEFAULT_NEWEST_ID_FILE;
use crate::types::{StringMap, WriteMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding a bearer token
pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";
/// Environment variable holding a consumer key
pub const ENV_CONSUMER_KEY: &str = "TWITTER_CONSUMER_KEY";
/// Environment variable holding a consumer secret
pub const ENV_CONSUMER_SECRET: &str = "TWITTER_CONSUMER_SECRET";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Credentials
    #[serde(default)]
    pub auth: AuthSection,

    /// Extra request headers
    #[serde(default)]
    pub headers: StringMap,

    /// Product tier and URL labels
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Request and output options
    #[serde(default)]
    pub options: OptionsSection,

    /// Pacing and retry settings
    #[serde(default)]
    pub session: SessionSection,
}

// ============================================================================
// Sections
// ============================================================================

/// `auth` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSection {
    /// App-only bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Consumer key, exchanged for a bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_key: Option<String>,
    /// Consumer secret, exchanged for a bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_secret: Option<String>,
    /// Basic-auth user (enterprise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Basic-auth password (enterprise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Token endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
}

/// `options` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsSection {
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    /// Expansion directives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansions: Option<String>,
    /// `tweet.fields`, `user.fields` and friends
    #[serde(flatten)]
    pub fields: FieldSelection,
    /// `standard_out` (or `so`), `files`, `hash`, `json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_mode: Option<String>,
    /// Directory for page files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_box: Option<PathBuf>,
    /// Gzip page files
    #[serde(default)]
    pub compress_files: bool,
    /// Request cap per session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_after: Option<u32>,
    /// Where polling keeps the newest ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_id_file: Option<PathBuf>,
}

/// `session` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSection {
    /// Minimum spacing between requests
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,
    /// Wait after a 5xx response
    #[serde(default = "default_server_error_cooldown_secs")]
    pub server_error_cooldown_secs: u64,
    /// Wait after a 429 response
    #[serde(default = "default_rate_limit_cooldown_secs")]
    pub rate_limit_cooldown_secs: u64,
    /// Pause before re-sending after a network fault
    #[serde(default)]
    pub transport_retry_delay_ms: u64,
    /// `count_against_cap` or `independent`
    #[serde(default = "default_retry_policy")]
    pub retry_policy: String,
    /// Consecutive retries allowed under `independent`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    /// HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_request_interval_ms() -> u64 {
    1000
}

fn default_server_error_cooldown_secs() -> u64 {
    30
}

fn default_rate_limit_cooldown_secs() -> u64 {
    60
}

fn default_retry_policy() -> String {
    "count_against_cap".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

const DEFAULT_MAX_RETRIES: u32 = 10;

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            request_interval_ms: default_request_interval_ms(),
            server_error_cooldown_secs: default_server_error_cooldown_secs(),
            rate_limit_cooldown_secs: default_rate_limit_cooldown_secs(),
            transport_retry_delay_ms: 0,
            retry_policy: default_retry_policy(),
            max_retries: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SessionSection {
    /// Parse the retry policy
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        match self.retry_policy.trim().to_ascii_lowercase().as_str() {
            "count_against_cap" | "cap" => Ok(RetryPolicy::CountAgainstCap),
            "independent" => Ok(RetryPolicy::Independent {
                max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            }),
            other => Err(Error::invalid_value(
                "session.retry_policy",
                format!("expected 'count_against_cap' or 'independent', got '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Loading and Conversion
// ============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SearchConfig {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: SearchConfig = if content.trim().is_empty() {
            SearchConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.options.max_results == Some(0) {
            return Err(Error::invalid_value(
                "options.max_results",
                "must be at least 1",
            ));
        }
        if self.options.exit_after == Some(0) {
            return Err(Error::invalid_value("options.exit_after", "must be at least 1"));
        }
        self.write_mode()?;
        self.session.retry_policy()?;
        self.endpoint.data_url()?;
        Ok(())
    }

    /// Configured write mode, `standard_out` when unset
    pub fn write_mode(&self) -> Result<WriteMode> {
        match self.options.write_mode.as_deref() {
            Some(mode) => mode.parse(),
            None => Ok(WriteMode::default()),
        }
    }

    /// Resolve credentials from the process environment and this config
    pub fn resolve_auth(&self) -> Result<AuthConfig> {
        self.resolve_auth_with(|key| std::env::var(key).ok())
    }

    /// Resolve credentials using the given environment lookup
    ///
    /// Order: env bearer token, env consumer key and secret, config bearer
    /// token, config consumer key and secret, config username and password.
    pub fn resolve_auth_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<AuthConfig> {
        let token_url = self
            .auth
            .token_url
            .clone()
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
        let exchange = |consumer_key: String, consumer_secret: String| {
            AuthConfig::ClientCredentials {
                token_url: token_url.clone(),
                consumer_key,
                consumer_secret,
            }
        };

        if let Some(token) = non_empty(lookup(ENV_BEARER_TOKEN)) {
            return Ok(AuthConfig::Bearer { token });
        }
        if let (Some(key), Some(secret)) = (
            non_empty(lookup(ENV_CONSUMER_KEY)),
            non_empty(lookup(ENV_CONSUMER_SECRET)),
        ) {
            return Ok(exchange(key, secret));
        }

        let auth = self.auth.clone();
        if let Some(token) = non_empty(auth.bearer_token) {
            return Ok(AuthConfig::Bearer { token });
        }
        if let (Some(key), Some(secret)) =
            (non_empty(auth.consumer_key), non_empty(auth.consumer_secret))
        {
            return Ok(exchange(key, secret));
        }
        if let (Some(username), Some(password)) =
            (non_empty(auth.username), auth.password.filter(|p| !p.is_empty()))
        {
            return Ok(AuthConfig::Basic { username, password });
        }

        Err(Error::missing_field("auth.bearer_token"))
    }

    /// Parameter builder for this endpoint and options
    pub fn parameter_builder(&self) -> RequestParameterBuilder {
        let mut builder = RequestParameterBuilder::new()
            .with_max_results_limit(self.endpoint.max_results_limit())
            .with_wire_format(self.endpoint.wire_format())
            .with_max_results(self.options.max_results.unwrap_or(DEFAULT_MAX_RESULTS))
            .with_fields(self.options.fields.clone());
        if let Some(expansions) = &self.options.expansions {
            builder = builder.with_expansions(expansions.clone());
        }
        builder
    }

    /// Engine settings
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let session = &self.session;
        Ok(EngineConfig::new()
            .with_exit_after(self.options.exit_after)
            .with_request_interval(Duration::from_millis(session.request_interval_ms))
            .with_cooldowns(
                Duration::from_secs(session.server_error_cooldown_secs),
                Duration::from_secs(session.rate_limit_cooldown_secs),
            )
            .with_transport_retry_delay(Duration::from_millis(session.transport_retry_delay_ms))
            .with_retry_policy(session.retry_policy()?))
    }

    /// HTTP client settings
    pub fn http_config(&self) -> Result<HttpClientConfig> {
        Ok(HttpClientConfig::builder()
            .url(self.endpoint.data_url()?.as_str())
            .method(self.endpoint.method())
            .timeout(Duration::from_secs(self.session.timeout_secs))
            .headers(self.headers.clone())
            .build())
    }

    /// File sink settings
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(
            self.options
                .out_box
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_BOX)),
        )
        .with_compress(self.options.compress_files)
    }

    /// Newest-ID file used by polling
    pub fn newest_id_file(&self) -> PathBuf {
        self.options
            .newest_id_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NEWEST_ID_FILE))
    }
}
