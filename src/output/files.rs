//! One file per page
//!
//! Files are named `<query prefix>_<earliest>_<latest>.json`, the stamps
//! taken from the items' `created_at`. A name already taken gets a numeric
//! suffix; probing uses `create_new` so an existing file is never replaced.

use super::sink::PageSink;
use super::types::SearchResult;
use crate::error::{Error, Result};
use crate::pagination::PageResponse;
use crate::query::Query;
use crate::time::{file_stamp, parse_created_at};
use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes every page to its own file in the outbox
#[derive(Debug)]
pub struct FileSink {
    out_box: PathBuf,
    compress: bool,
    written: Vec<PathBuf>,
}

impl FileSink {
    /// Create the sink, making the outbox if it does not exist
    pub fn new(out_box: impl Into<PathBuf>, compress: bool) -> Result<Self> {
        let out_box = out_box.into();
        fs::create_dir_all(&out_box).map_err(|e| {
            Error::output(format!(
                "cannot create output directory {}: {e}",
                out_box.display()
            ))
        })?;

        Ok(Self {
            out_box,
            compress,
            written: Vec::new(),
        })
    }

    /// Files written so far, in order
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }

    /// Output directory
    pub fn out_box(&self) -> &Path {
        &self.out_box
    }

    fn extension(&self) -> &'static str {
        if self.compress {
            "json.gz"
        } else {
            "json"
        }
    }

    /// Create the first free file for a stem
    fn create_unique(&self, stem: &str) -> Result<(PathBuf, File)> {
        let ext = self.extension();
        let mut suffix = 0u32;

        loop {
            let name = if suffix == 0 {
                format!("{stem}.{ext}")
            } else {
                format!("{stem}_{suffix}.{ext}")
            };
            let path = self.out_box.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!("{} exists, probing next name", path.display());
                    suffix += 1;
                }
                Err(e) => {
                    return Err(Error::output(format!(
                        "cannot create {}: {e}",
                        path.display()
                    )))
                }
            }
        }
    }

    fn write_body(&self, file: File, body: &[u8]) -> io::Result<()> {
        let writer = BufWriter::new(file);
        if self.compress {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            encoder.write_all(body)?;
            encoder.finish()?.flush()
        } else {
            let mut writer = writer;
            writer.write_all(body)?;
            writer.flush()
        }
    }
}

impl PageSink for FileSink {
    fn write_page(&mut self, query: &Query, page: &PageResponse) -> Result<()> {
        if page.items().is_empty() {
            info!("Page has no items, no file written");
            return Ok(());
        }

        let stem = page_file_stem(query, page.items(), Utc::now());
        let (path, file) = self.create_unique(&stem)?;
        let body = serde_json::to_vec(&page.raw)?;

        self.write_body(file, &body)
            .map_err(|e| Error::output(format!("cannot write {}: {e}", path.display())))?;

        info!("Storing Search API data in file: {}", path.display());
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self, _newest_id: Option<&str>) -> Result<SearchResult> {
        debug!("Wrote {} page files", self.written.len());
        Ok(SearchResult::Emitted)
    }
}

/// File name without extension for a page of items
///
/// Items without a parseable `created_at` use `fallback`.
pub fn page_file_stem(query: &Query, items: &[Value], fallback: DateTime<Utc>) -> String {
    let stamps: Vec<DateTime<Utc>> = items
        .iter()
        .filter_map(|item| item.get("created_at").and_then(Value::as_str))
        .filter_map(parse_created_at)
        .collect();

    let earliest = stamps.iter().min().copied().unwrap_or(fallback);
    let latest = stamps.iter().max().copied().unwrap_or(fallback);

    format!(
        "{}_{}_{}",
        query.file_prefix(),
        file_stamp(&earliest),
        file_stamp(&latest)
    )
}
