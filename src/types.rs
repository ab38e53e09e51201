//! Common types used throughout the search client
//!
//! Header maps and the small enums shared by config, transport and output.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method used to reach the search endpoint.
///
/// Fixed per session: the recent-search endpoint takes GET query parameters,
/// premium and enterprise tiers take a POST body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        }
    }
}

// ============================================================================
// Write Mode
// ============================================================================

/// Where each page of results goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Print every page to standard out as it arrives
    #[default]
    StandardOut,
    /// Write every page to its own file in the outbox
    Files,
    /// Accumulate pages and return structured values at session end
    Hash,
    /// Accumulate pages and return JSON strings at session end
    Json,
}

impl WriteMode {
    /// Whether this mode holds results in memory until the session ends
    pub fn accumulates(&self) -> bool {
        matches!(self, Self::Hash | Self::Json)
    }

    /// Name as used in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StandardOut => "standard_out",
            Self::Files => "files",
            Self::Hash => "hash",
            Self::Json => "json",
        }
    }
}

impl FromStr for WriteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard_out" | "standard-out" | "standard" | "so" => Ok(Self::StandardOut),
            "files" | "file" => Ok(Self::Files),
            "hash" => Ok(Self::Hash),
            "json" => Ok(Self::Json),
            other => Err(Error::invalid_value(
                "write_mode",
                format!("'{other}' is not one of files, standard_out, hash, json"),
            )),
        }
    }
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
