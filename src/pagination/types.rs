//! Page and session types
//!
//! A decoded page of search results and the per-session state the
//! pagination loop carries from one iteration to the next.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination metadata of one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Token for the following page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Newest result ID in the whole result set (meaningful on the first page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<String>,
    /// Oldest result ID on this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<String>,
    /// Number of items on this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,
}

/// Auxiliary objects referenced by a page's items
///
/// Duplicates are kept: the same user may appear on every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Includes {
    /// Expanded user objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<Value>,
    /// Referenced items (quoted, replied-to, retweeted)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tweets: Vec<Value>,
    /// Expanded media objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Value>,
    /// Expanded place objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<Value>,
    /// Expanded poll objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polls: Vec<Value>,
}

impl Includes {
    /// Append every class from another page, keeping arrival order
    pub fn extend_from(&mut self, other: &Includes) {
        self.users.extend(other.users.iter().cloned());
        self.tweets.extend(other.tweets.iter().cloned());
        self.media.extend(other.media.iter().cloned());
        self.places.extend(other.places.iter().cloned());
        self.polls.extend(other.polls.iter().cloned());
    }

    /// Total number of auxiliary objects
    pub fn len(&self) -> usize {
        self.users.len() + self.tweets.len() + self.media.len() + self.places.len() + self.polls.len()
    }

    /// Whether no auxiliary objects are present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One decoded page of results
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageResponse {
    /// Result items in API order (newest first)
    ///
    /// Archive tiers name this array `results`.
    #[serde(default, alias = "results")]
    pub data: Vec<Value>,
    /// Auxiliary objects
    #[serde(default)]
    pub includes: Includes,
    /// Pagination metadata
    #[serde(default)]
    pub meta: PageMeta,
    /// Partial-failure entries on an otherwise successful page
    #[serde(default)]
    pub errors: Vec<Value>,
    /// Top-level continuation token of the archive tiers
    #[serde(default)]
    pub next: Option<String>,
    /// The body exactly as decoded, for persisting
    #[serde(skip)]
    pub raw: Value,
}

impl PageResponse {
    /// Decode a response body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(body)
            .map_err(|e| Error::decode(format!("response body is not JSON: {e}")))?;
        Self::from_value(raw)
    }

    /// Decode an already parsed body
    pub fn from_value(raw: Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(Error::decode("response body is not a JSON object"));
        }
        let mut page: PageResponse = serde_json::from_value(raw.clone())
            .map_err(|e| Error::decode(format!("unexpected response shape: {e}")))?;
        page.raw = raw;
        Ok(page)
    }

    /// Result items
    pub fn items(&self) -> &[Value] {
        &self.data
    }

    /// Continuation token, if another page follows
    pub fn next_token(&self) -> Option<&str> {
        self.meta.next_token.as_deref().or(self.next.as_deref())
    }

    /// Item count, preferring the API's own figure
    pub fn result_count(&self) -> u64 {
        self.meta
            .result_count
            .unwrap_or(self.data.len() as u64)
    }
}

/// State owned by one pagination session
///
/// Created zeroed when a session starts and dropped when it ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Dispatched requests that produced a response, retries included
    pub request_count: u32,
    /// Retried attempts
    pub retry_count: u32,
    /// Pages handed to the output sink
    pub page_count: u32,
    /// Items received
    pub result_count: u64,
    /// Newest ID captured from the first page
    pub newest_id: Option<String>,
    /// Token for the next request
    pub next_token: Option<String>,
    newest_id_captured: bool,
}

impl SessionState {
    /// Create a fresh session state
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a dispatched request
    pub fn record_request(&mut self) {
        self.request_count += 1;
    }

    /// Count a retried attempt
    pub fn record_retry(&mut self) {
        self.retry_count += 1;
    }

    /// Fold a successful page into the state
    ///
    /// Only the first page sets `newest_id`; when it carries none the
    /// caller's `since_id` stands in. Later pages never overwrite it.
    pub fn record_page(&mut self, page: &PageResponse, since_id: Option<&str>) {
        self.page_count += 1;
        self.result_count += page.result_count();

        if !self.newest_id_captured {
            self.newest_id = page
                .meta
                .newest_id
                .clone()
                .or_else(|| since_id.map(ToString::to_string));
            self.newest_id_captured = true;
        }

        self.next_token = page.next_token().map(ToString::to_string);
    }

    /// Whether the newest ID has been fixed for this session
    pub fn has_newest_id(&self) -> bool {
        self.newest_id_captured
    }

    /// Whether a further page is available
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}
