//! Request types

use crate::query::Query;
use crate::time::{archive_timestamp, request_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Time or ID window of a search
///
/// Both kinds of bound may be set; the API decides which wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestRange {
    /// Oldest creation time to match (inclusive)
    pub start_time: Option<DateTime<Utc>>,
    /// Newest creation time to match (exclusive)
    pub end_time: Option<DateTime<Utc>>,
    /// Only results newer than this ID
    pub since_id: Option<String>,
    /// Only results older than this ID
    pub until_id: Option<String>,
    /// Per-request override of the session's page size
    pub max_results: Option<u32>,
}

impl RequestRange {
    /// Create an unbounded range
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start time
    #[must_use]
    pub fn with_start_time(mut self, time: DateTime<Utc>) -> Self {
        self.start_time = Some(time);
        self
    }

    /// Set the end time
    #[must_use]
    pub fn with_end_time(mut self, time: DateTime<Utc>) -> Self {
        self.end_time = Some(time);
        self
    }

    /// Set the since ID
    #[must_use]
    pub fn with_since_id(mut self, id: impl Into<String>) -> Self {
        self.since_id = Some(id.into());
        self
    }

    /// Set the until ID
    #[must_use]
    pub fn with_until_id(mut self, id: impl Into<String>) -> Self {
        self.until_id = Some(id.into());
        self
    }

    /// Override the page size
    #[must_use]
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Continue from a previously seen newest ID
    ///
    /// Time bounds are dropped: the ID bound alone decides where to resume.
    #[must_use]
    pub fn resumed_from(mut self, newest_id: impl Into<String>) -> Self {
        self.since_id = Some(newest_id.into());
        self.start_time = None;
        self.end_time = None;
        self
    }
}

/// Which optional fields to request for each object class
///
/// `None` means the class is not requested at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    /// Fields of result items (`tweet.fields`)
    #[serde(default, rename = "tweet.fields")]
    pub tweet: Option<String>,
    /// Fields of expanded users (`user.fields`)
    #[serde(default, rename = "user.fields")]
    pub user: Option<String>,
    /// Fields of expanded media (`media.fields`)
    #[serde(default, rename = "media.fields")]
    pub media: Option<String>,
    /// Fields of expanded places (`place.fields`)
    #[serde(default, rename = "place.fields")]
    pub place: Option<String>,
    /// Fields of expanded polls (`poll.fields`)
    #[serde(default, rename = "poll.fields")]
    pub poll: Option<String>,
}

impl FieldSelection {
    /// Parameter name and value for every requested class, in fixed order
    pub fn params(&self) -> Vec<(&'static str, String)> {
        [
            ("tweet.fields", &self.tweet),
            ("user.fields", &self.user),
            ("media.fields", &self.media),
            ("place.fields", &self.place),
            ("poll.fields", &self.poll),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (name, v.to_string()))
        })
        .collect()
    }
}

/// Parameter names and timestamp layout an endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// v2 search: `start_time`, `end_time`, `max_results`, `next_token`
    #[default]
    V2,
    /// Premium and enterprise: `fromDate`, `toDate` (`YYYYMMDDHHMM`),
    /// `maxResults`, `next`
    ///
    /// These tiers take no ID bounds, expansions or field selection.
    Archive,
}

/// Parameters of one page request
///
/// Never mutated once built: a retry re-sends the identical value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// The query, tag included
    pub query: Query,
    /// Start of the time window
    pub start_time: Option<DateTime<Utc>>,
    /// End of the time window
    pub end_time: Option<DateTime<Utc>>,
    /// Exclusive lower ID bound
    pub since_id: Option<String>,
    /// Exclusive upper ID bound
    pub until_id: Option<String>,
    /// Page size
    pub max_results: u32,
    /// Expansion directives
    pub expansions: Option<String>,
    /// Field selection
    pub fields: FieldSelection,
    /// Continuation token from the previous page
    pub next_token: Option<String>,
    /// Layout the endpoint expects
    pub format: WireFormat,
}

impl PageRequest {
    /// Whether this is the first request of a session
    pub fn is_first_page(&self) -> bool {
        self.next_token.is_none()
    }

    /// Parameters as ordered name/value pairs, absent values omitted
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        match self.format {
            WireFormat::V2 => self.v2_params(),
            WireFormat::Archive => self.archive_params(),
        }
    }

    fn v2_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.query.value.clone())];

        if let Some(start) = &self.start_time {
            params.push(("start_time", request_timestamp(start)));
        }
        if let Some(end) = &self.end_time {
            params.push(("end_time", request_timestamp(end)));
        }
        if let Some(id) = &self.since_id {
            params.push(("since_id", id.clone()));
        }
        if let Some(id) = &self.until_id {
            params.push(("until_id", id.clone()));
        }

        params.push(("max_results", self.max_results.to_string()));

        if let Some(expansions) = self.expansions.as_deref().filter(|e| !e.is_empty()) {
            params.push(("expansions", expansions.to_string()));
        }
        params.extend(self.fields.params());

        if let Some(token) = &self.next_token {
            params.push(("next_token", token.clone()));
        }

        params
    }

    fn archive_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.query.value.clone())];

        if let Some(start) = &self.start_time {
            params.push(("fromDate", archive_timestamp(start)));
        }
        if let Some(end) = &self.end_time {
            params.push(("toDate", archive_timestamp(end)));
        }
        params.push(("maxResults", self.max_results.to_string()));
        if let Some(token) = &self.next_token {
            params.push(("next", token.clone()));
        }

        params
    }

    /// Parameters as a JSON object, for endpoints that take a POST body
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        for (name, value) in self.to_params() {
            let value = if matches!(name, "max_results" | "maxResults") {
                Value::from(self.max_results)
            } else {
                Value::String(value)
            };
            body.insert(name.to_string(), value);
        }
        Value::Object(body)
    }
}
