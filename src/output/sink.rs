//! The page sink seam

use super::accumulate::{Accumulator, ReturnFormat};
use super::console::StandardOutSink;
use super::files::FileSink;
use super::types::{OutputConfig, SearchResult};
use crate::error::Result;
use crate::pagination::PageResponse;
use crate::query::Query;
use crate::types::WriteMode;

/// Consumer of the pages one session produces
///
/// `write_page` is called once per successful page, in request order.
/// `finish` is called once after the last page.
pub trait PageSink: Send {
    /// Take one page
    fn write_page(&mut self, query: &Query, page: &PageResponse) -> Result<()>;

    /// End the session and hand back what was collected
    fn finish(&mut self, newest_id: Option<&str>) -> Result<SearchResult>;
}

impl<S: PageSink + ?Sized> PageSink for Box<S> {
    fn write_page(&mut self, query: &Query, page: &PageResponse) -> Result<()> {
        (**self).write_page(query, page)
    }

    fn finish(&mut self, newest_id: Option<&str>) -> Result<SearchResult> {
        (**self).finish(newest_id)
    }
}

/// Build the sink for a write mode
pub fn build_sink(mode: WriteMode, config: &OutputConfig) -> Result<Box<dyn PageSink>> {
    let sink: Box<dyn PageSink> = match mode {
        WriteMode::Files => Box::new(FileSink::new(config.out_box.clone(), config.compress)?),
        WriteMode::StandardOut => Box::new(StandardOutSink::stdout()),
        WriteMode::Hash => Box::new(Accumulator::new(ReturnFormat::Hash)),
        WriteMode::Json => Box::new(Accumulator::new(ReturnFormat::Json)),
    };
    Ok(sink)
}
