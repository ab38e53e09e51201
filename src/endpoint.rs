//! Endpoint URLs
//!
//! Maps a product tier to the absolute search URL and the request method
//! that tier expects.

use crate::error::{Error, Result};
use crate::request::WireFormat;
use crate::types::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

const RECENT_URL: &str = "https://api.twitter.com/2/tweets/search/recent";
const PREMIUM_ROOT: &str = "https://api.twitter.com/1.1/tweets/search/";
const ENTERPRISE_ROOT: &str = "https://gnip-api.twitter.com/search/";

/// Search product tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    /// v2 recent search (last seven days)
    #[default]
    Recent,
    /// Premium 30-day or full-archive search
    Premium,
    /// Enterprise 30-day or full-archive search
    Enterprise,
}

impl Product {
    /// Name as used in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }
}

impl FromStr for Product {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" | "labs" | "v2" => Ok(Self::Recent),
            "premium" => Ok(Self::Premium),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(Error::invalid_value(
                "endpoint.product",
                format!("unknown product '{other}'"),
            )),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_archive() -> String {
    "30day".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

/// Where searches are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Product tier
    #[serde(default)]
    pub product: Product,
    /// `30day` or `fullarchive` (premium and enterprise)
    #[serde(default = "default_archive")]
    pub archive: String,
    /// Environment label, e.g. `dev` or `prod` (premium and enterprise)
    #[serde(default = "default_environment", alias = "label")]
    pub environment: String,
    /// Account name (enterprise only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Absolute URL that replaces the derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            product: Product::default(),
            archive: default_archive(),
            environment: default_environment(),
            account_name: None,
            url: None,
        }
    }
}

impl EndpointConfig {
    /// Endpoint for a product with default labels
    pub fn new(product: Product) -> Self {
        Self {
            product,
            ..Default::default()
        }
    }

    /// Replace the derived URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Absolute data URL for this endpoint
    pub fn data_url(&self) -> Result<Url> {
        if let Some(url) = &self.url {
            return Ok(Url::parse(url)?);
        }

        let raw = match self.product {
            Product::Recent => RECENT_URL.to_string(),
            Product::Premium => format!(
                "{PREMIUM_ROOT}{}/{}.json",
                self.archive, self.environment
            ),
            Product::Enterprise => {
                let account = self
                    .account_name
                    .as_deref()
                    .filter(|a| !a.is_empty())
                    .ok_or_else(|| Error::missing_field("endpoint.account_name"))?;
                format!(
                    "{ENTERPRISE_ROOT}{}/accounts/{account}/{}.json",
                    self.archive, self.environment
                )
            }
        };

        Ok(Url::parse(&raw)?)
    }

    /// How parameters are sent to this endpoint
    pub fn method(&self) -> Method {
        match self.product {
            Product::Recent => Method::GET,
            Product::Premium | Product::Enterprise => Method::POST,
        }
    }

    /// Parameter names and response shape this tier speaks
    pub fn wire_format(&self) -> WireFormat {
        match self.product {
            Product::Recent => WireFormat::V2,
            Product::Premium | Product::Enterprise => WireFormat::Archive,
        }
    }

    /// Largest page this tier serves
    pub fn max_results_limit(&self) -> u32 {
        match self.product {
            Product::Recent => 100,
            Product::Premium | Product::Enterprise => 500,
        }
    }
}
