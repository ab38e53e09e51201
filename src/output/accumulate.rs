//! In-memory accumulation

use super::sink::PageSink;
use super::types::SearchResult;
use crate::error::Result;
use crate::pagination::{Includes, PageResponse};
use crate::query::Query;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Shape of the value returned at session end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnFormat {
    /// Structured values
    #[default]
    Hash,
    /// JSON strings
    Json,
}

/// Collects items and includes across pages
///
/// Arrival order is preserved and nothing is deduplicated.
#[derive(Debug, Default)]
pub struct Accumulator {
    format: ReturnFormat,
    items: Vec<Value>,
    includes: Includes,
}

impl Accumulator {
    /// Create an empty accumulator
    pub fn new(format: ReturnFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Items collected so far
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Includes collected so far
    pub fn includes(&self) -> &Includes {
        &self.includes
    }
}

impl PageSink for Accumulator {
    fn write_page(&mut self, _query: &Query, page: &PageResponse) -> Result<()> {
        self.items.extend(page.data.iter().cloned());
        self.includes.extend_from(&page.includes);
        debug!(
            "Accumulated {} items, {} includes",
            self.items.len(),
            self.includes.len()
        );
        Ok(())
    }

    fn finish(&mut self, _newest_id: Option<&str>) -> Result<SearchResult> {
        let items = std::mem::take(&mut self.items);
        let includes = std::mem::take(&mut self.includes);

        Ok(match self.format {
            ReturnFormat::Hash => SearchResult::Collected { items, includes },
            ReturnFormat::Json => SearchResult::Serialized {
                items: serde_json::to_string(&items)?,
                includes: serde_json::to_string(&includes)?,
            },
        })
    }
}
