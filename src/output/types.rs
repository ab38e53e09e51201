//! Output types

use crate::pagination::Includes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Directory page files go to unless configured otherwise
pub const DEFAULT_OUT_BOX: &str = "./outbox";

/// Settings for the file-writing sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for page files
    pub out_box: PathBuf,
    /// Gzip each page file
    pub compress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_box: PathBuf::from(DEFAULT_OUT_BOX),
            compress: false,
        }
    }
}

impl OutputConfig {
    /// Create a config for the given directory
    pub fn new(out_box: impl Into<PathBuf>) -> Self {
        Self {
            out_box: out_box.into(),
            compress: false,
        }
    }

    /// Enable or disable gzip
    #[must_use]
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// What a finished session hands back
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// Pages were written out as they arrived
    Emitted,
    /// Every item and include, in arrival order
    Collected {
        /// Result items
        items: Vec<Value>,
        /// Auxiliary objects, duplicates kept
        includes: Includes,
    },
    /// The same accumulation serialized to JSON strings
    Serialized {
        /// Items as a JSON array
        items: String,
        /// Includes as a JSON object
        includes: String,
    },
}

impl SearchResult {
    /// Collected items, if this result holds structured values
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Self::Collected { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Collected includes, if this result holds structured values
    pub fn includes(&self) -> Option<&Includes> {
        match self {
            Self::Collected { includes, .. } => Some(includes),
            _ => None,
        }
    }
}
