//! Request parameter builder

use super::types::{FieldSelection, PageRequest, RequestRange, WireFormat};
use crate::query::Query;

/// Largest page the search API will serve
pub const MAX_RESULTS_LIMIT: u32 = 100;

/// Smallest page any tier accepts
pub const MIN_RESULTS: u32 = 10;

/// Page size used when neither the session nor the call sets one
pub const DEFAULT_MAX_RESULTS: u32 = MAX_RESULTS_LIMIT;

/// Assembles `PageRequest`s from the session-wide settings
///
/// Pure: building a request has no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameterBuilder {
    max_results: u32,
    max_results_limit: u32,
    expansions: Option<String>,
    fields: FieldSelection,
    format: WireFormat,
}

impl Default for RequestParameterBuilder {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_results_limit: MAX_RESULTS_LIMIT,
            expansions: None,
            fields: FieldSelection::default(),
            format: WireFormat::default(),
        }
    }
}

impl RequestParameterBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session's page size
    #[must_use]
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }

    /// Set the API ceiling on page size
    #[must_use]
    pub fn with_max_results_limit(mut self, limit: u32) -> Self {
        self.max_results_limit = limit;
        self
    }

    /// Set the expansion directives
    #[must_use]
    pub fn with_expansions(mut self, expansions: impl Into<String>) -> Self {
        self.expansions = Some(expansions.into());
        self
    }

    /// Set the field selection
    #[must_use]
    pub fn with_fields(mut self, fields: FieldSelection) -> Self {
        self.fields = fields;
        self
    }

    /// Set the parameter layout of the target endpoint
    #[must_use]
    pub fn with_wire_format(mut self, format: WireFormat) -> Self {
        self.format = format;
        self
    }

    /// Parameter layout requests are built in
    pub fn wire_format(&self) -> WireFormat {
        self.format
    }

    /// Page size this builder falls back to
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Build the request for one page
    pub fn build(
        &self,
        query: &Query,
        range: &RequestRange,
        next_token: Option<&str>,
    ) -> PageRequest {
        let max_results = range
            .max_results
            .unwrap_or(self.max_results)
            .clamp(MIN_RESULTS, self.max_results_limit.max(MIN_RESULTS));

        PageRequest {
            query: query.clone(),
            start_time: range.start_time,
            end_time: range.end_time,
            since_id: range.since_id.clone(),
            until_id: range.until_id.clone(),
            max_results,
            expansions: self.expansions.clone(),
            fields: self.fields.clone(),
            next_token: next_token.map(ToString::to_string),
            format: self.format,
        }
    }
}
