//! HTTP client for the search endpoint
//!
//! Sends one page request per call:
//! - GET with the parameters as a query string (recent search)
//! - POST with the parameters as a JSON body (premium and enterprise)
//!
//! Retries, cooldowns and throttling live in the pagination engine, not here.

use super::transport::{RawResponse, Transport};
use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::request::PageRequest;
use crate::types::{Method, StringMap};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Absolute URL of the search endpoint
    pub url: String,
    /// How parameters are sent
    pub method: Method,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: Method::GET,
            timeout: Duration::from_secs(30),
            default_headers: StringMap::new(),
            user_agent: format!("search-tweets/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Build a reqwest client with this timeout and user agent
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(Error::Http)
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the endpoint URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Set the request method
    pub fn method(mut self, method: Method) -> Self {
        self.config.method = method;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Add several default headers
    pub fn headers(mut self, headers: StringMap) -> Self {
        self.config.default_headers.extend(headers);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// reqwest-backed transport bound to one endpoint
pub struct HttpClient {
    client: Client,
    url: Url,
    config: HttpClientConfig,
    authenticator: Authenticator,
}

impl HttpClient {
    /// Create a client without credentials
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_auth(config, Authenticator::none())
    }

    /// Create a client that applies the given credentials
    pub fn with_auth(config: HttpClientConfig, authenticator: Authenticator) -> Result<Self> {
        let client = config.build_client()?;
        Self::from_parts(client, config, authenticator)
    }

    /// Create a client around an existing reqwest client
    ///
    /// Lets the token exchange and the searches share one connection pool.
    pub fn from_parts(
        client: Client,
        config: HttpClientConfig,
        authenticator: Authenticator,
    ) -> Result<Self> {
        if config.url.is_empty() {
            return Err(Error::missing_field("endpoint.url"));
        }
        let url = Url::parse(&config.url)?;

        Ok(Self {
            client,
            url,
            config,
            authenticator,
        })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Endpoint this client sends to
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request method
    pub fn method(&self) -> Method {
        self.config.method
    }

    /// Send one page request
    pub async fn execute(&self, request: &PageRequest) -> Result<RawResponse> {
        let mut req = self
            .client
            .request(self.config.method.into(), self.url.clone())
            .timeout(self.config.timeout);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        req = match self.config.method {
            Method::GET => req.query(&request.to_params()),
            Method::POST => req.json(&request.to_json()),
        };

        req = self.authenticator.apply(req);

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(
            "{:?} {} -> {} ({} bytes)",
            self.config.method,
            self.url,
            status,
            body.len()
        );

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: &PageRequest) -> Result<RawResponse> {
        self.execute(request).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("url", &self.url.as_str())
            .field("method", &self.config.method)
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}
