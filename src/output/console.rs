//! Standard out sink

use super::sink::PageSink;
use super::types::SearchResult;
use crate::error::{Error, Result};
use crate::pagination::PageResponse;
use crate::query::Query;
use serde_json::Value;
use std::io::{self, Stdout, Write};

/// Prints each page as it arrives, one compact JSON object per line
///
/// Sections come in a fixed order; empty ones are left out.
pub struct StandardOutSink<W: Write + Send> {
    out: W,
}

impl StandardOutSink<Stdout> {
    /// Sink writing to the process's standard out
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> StandardOutSink<W> {
    /// Sink writing to any writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn section(&mut self, header: &str, values: &[Value]) -> io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "{header}")?;
        for value in values {
            writeln!(self.out, "{value}")?;
        }
        Ok(())
    }

    fn emit(&mut self, page: &PageResponse) -> io::Result<()> {
        let includes = &page.includes;
        self.section("Matching Tweets:", &page.data)?;
        self.section("Expanded user objects:", &includes.users)?;
        self.section(
            "Expanded Tweet objects for referenced Tweets:",
            &includes.tweets,
        )?;
        self.section("Expanded media objects:", &includes.media)?;
        self.section("Expanded place objects:", &includes.places)?;
        self.section("Expanded poll objects:", &includes.polls)?;
        self.section("Access errors:", &page.errors)?;
        self.out.flush()
    }
}

impl<W: Write + Send> PageSink for StandardOutSink<W> {
    fn write_page(&mut self, _query: &Query, page: &PageResponse) -> Result<()> {
        self.emit(page)
            .map_err(|e| Error::output(format!("cannot write to standard out: {e}")))
    }

    fn finish(&mut self, _newest_id: Option<&str>) -> Result<SearchResult> {
        Ok(SearchResult::Emitted)
    }
}

impl<W: Write + Send> std::fmt::Debug for StandardOutSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardOutSink").finish_non_exhaustive()
    }
}
