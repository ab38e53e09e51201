//! Query types

use serde::{Deserialize, Serialize};

/// One search query
///
/// Immutable once built. The tag never becomes a request parameter of its own;
/// it travels with the query and labels the results it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Search expression, e.g. `(snow OR rain) -is:retweet`
    pub value: String,
    /// Optional label for the matched results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Query {
    /// Create an untagged query
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: None,
        }
    }

    /// Create a tagged query
    pub fn tagged(value: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: Some(tag.into()),
        }
    }

    /// First ten alphanumeric characters of the expression
    pub fn file_prefix(&self) -> String {
        self.value
            .chars()
            .filter(|c| c.is_alphanumeric())
            .take(10)
            .collect()
    }
}

/// An ordered collection of queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySet {
    /// Queries in the order they will be run
    #[serde(default)]
    pub queries: Vec<Query>,
}

impl QuerySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query; the tag is optional
    pub fn add_query(&mut self, value: impl Into<String>, tag: Option<String>) {
        self.queries.push(Query {
            value: value.into(),
            tag,
        });
    }

    /// Remove every query with this expression, regardless of tag
    pub fn delete_query(&mut self, value: &str) {
        self.queries.retain(|q| q.value != value);
    }

    /// Attach a tag to the first query
    pub fn tag_first(&mut self, tag: impl Into<String>) {
        if let Some(first) = self.queries.first_mut() {
            first.tag = Some(tag.into());
        }
    }

    /// Serialize as `{"queries": [...]}`
    pub fn to_json(&self) -> String {
        serde_json::json!({ "queries": self.queries }).to_string()
    }

    /// Number of queries
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Iterate over the queries
    pub fn iter(&self) -> std::slice::Iter<'_, Query> {
        self.queries.iter()
    }
}
