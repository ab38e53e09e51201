//! Tests for output module

use super::*;
use crate::pagination::PageResponse;
use crate::query::Query;
use crate::types::WriteMode;
use chrono::{TimeZone, Utc};
use flate2::read::GzDecoder;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Read;
use tempfile::tempdir;

fn page(value: serde_json::Value) -> PageResponse {
    PageResponse::from_value(value).unwrap()
}

fn rain_page() -> PageResponse {
    page(json!({
        "data": [
            {"id": "3", "created_at": "2020-05-10T11:59:00.000Z", "text": "rain"},
            {"id": "2", "created_at": "2020-05-10T11:30:15.000Z", "text": "more rain"}
        ],
        "includes": {"users": [{"id": "u1", "username": "weather"}]},
        "meta": {"newest_id": "3", "oldest_id": "2", "result_count": 2}
    }))
}

// ============================================================================
// File Naming Tests
// ============================================================================

#[test]
fn test_file_stem_uses_earliest_and_latest() {
    let query = Query::new("(rain OR snow) -is:retweet");
    let stem = page_file_stem(&query, rain_page().items(), Utc::now());
    assert_eq!(stem, "rainORsnow_20200510113015_20200510115900");
}

#[test]
fn test_file_stem_falls_back_when_no_timestamps() {
    let fallback = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
    let items = vec![json!({"id": "1"}), json!({"id": "2", "created_at": "bogus"})];
    let stem = page_file_stem(&Query::new("rain"), &items, fallback);
    assert_eq!(stem, "rain_20210102030405_20210102030405");
}

// ============================================================================
// FileSink Tests
// ============================================================================

#[test]
fn test_file_sink_creates_directory_and_writes_raw_page() {
    let dir = tempdir().unwrap();
    let out_box = dir.path().join("nested").join("outbox");
    let mut sink = FileSink::new(&out_box, false).unwrap();
    assert!(out_box.is_dir());

    let page = rain_page();
    sink.write_page(&Query::new("rain"), &page).unwrap();

    assert_eq!(sink.written_files().len(), 1);
    let path = &sink.written_files()[0];
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "rain_20200510113015_20200510115900.json"
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written, page.raw);
    assert_eq!(sink.finish(Some("3")).unwrap(), SearchResult::Emitted);
}

#[test]
fn test_file_sink_skips_taken_names() {
    let dir = tempdir().unwrap();
    let mut sink = FileSink::new(dir.path(), false).unwrap();
    let query = Query::new("rain");

    for _ in 0..3 {
        sink.write_page(&query, &rain_page()).unwrap();
    }

    let names: Vec<String> = sink
        .written_files()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "rain_20200510113015_20200510115900.json",
            "rain_20200510113015_20200510115900_1.json",
            "rain_20200510113015_20200510115900_2.json",
        ]
    );
}

#[test]
fn test_file_sink_does_not_overwrite_existing_file() {
    let dir = tempdir().unwrap();
    let existing = dir.path().join("rain_20200510113015_20200510115900.json");
    std::fs::write(&existing, "keep me").unwrap();

    let mut sink = FileSink::new(dir.path(), false).unwrap();
    sink.write_page(&Query::new("rain"), &rain_page()).unwrap();

    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");
    assert!(sink.written_files()[0]
        .to_string_lossy()
        .ends_with("_1.json"));
}

#[test]
fn test_file_sink_gzip() {
    let dir = tempdir().unwrap();
    let mut sink = FileSink::new(dir.path(), true).unwrap();
    let page = rain_page();
    sink.write_page(&Query::new("rain"), &page).unwrap();

    let path = &sink.written_files()[0];
    assert!(path.to_string_lossy().ends_with(".json.gz"));

    let mut decoder = GzDecoder::new(std::fs::File::open(path).unwrap());
    let mut content = String::new();
    decoder.read_to_string(&mut content).unwrap();
    let written: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(written, page.raw);
}

#[test]
fn test_file_sink_skips_empty_page() {
    let dir = tempdir().unwrap();
    let mut sink = FileSink::new(dir.path(), false).unwrap();
    sink.write_page(
        &Query::new("rain"),
        &page(json!({"meta": {"result_count": 0, "next_token": "abc"}})),
    )
    .unwrap();

    assert!(sink.written_files().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ============================================================================
// StandardOutSink Tests
// ============================================================================

#[test]
fn test_standard_out_sections() {
    let mut sink = StandardOutSink::new(Vec::new());
    let page = page(json!({
        "data": [{"id": "1", "text": "rain"}],
        "includes": {
            "users": [{"id": "u1"}],
            "tweets": [{"id": "9"}],
            "polls": [{"id": "p1"}]
        },
        "errors": [{"title": "Authorization Error", "value": "5"}]
    }));

    sink.write_page(&Query::new("rain"), &page).unwrap();
    assert_eq!(sink.finish(None).unwrap(), SearchResult::Emitted);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let expected = [
        "Matching Tweets:",
        r#"{"id":"1","text":"rain"}"#,
        "Expanded user objects:",
        r#"{"id":"u1"}"#,
        "Expanded Tweet objects for referenced Tweets:",
        r#"{"id":"9"}"#,
        "Expanded poll objects:",
        r#"{"id":"p1"}"#,
        "Access errors:",
        r#"{"title":"Authorization Error","value":"5"}"#,
    ];
    assert_eq!(text.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_standard_out_empty_page_prints_nothing() {
    let mut sink = StandardOutSink::new(Vec::new());
    sink.write_page(&Query::new("rain"), &page(json!({"meta": {"result_count": 0}})))
        .unwrap();
    assert!(sink.into_inner().is_empty());
}

// ============================================================================
// Accumulator Tests
// ============================================================================

#[test]
fn test_accumulator_keeps_order_and_duplicates() {
    let mut sink = Accumulator::new(ReturnFormat::Hash);
    let query = Query::new("rain");

    sink.write_page(&query, &rain_page()).unwrap();
    sink.write_page(
        &query,
        &page(json!({
            "data": [{"id": "1"}],
            "includes": {"users": [{"id": "u1", "username": "weather"}]}
        })),
    )
    .unwrap();

    assert_eq!(sink.items().len(), 3);
    let result = sink.finish(Some("3")).unwrap();

    let ids: Vec<&str> = result
        .items()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
    assert_eq!(result.includes().unwrap().users.len(), 2);
}

#[test]
fn test_accumulator_json_format() {
    let mut sink = Accumulator::new(ReturnFormat::Json);
    sink.write_page(&Query::new("rain"), &rain_page()).unwrap();

    let SearchResult::Serialized { items, includes } = sink.finish(None).unwrap() else {
        panic!("Expected Serialized");
    };
    let items: serde_json::Value = serde_json::from_str(&items).unwrap();
    let includes: serde_json::Value = serde_json::from_str(&includes).unwrap();
    assert_eq!(items.as_array().unwrap().len(), 2);
    assert_eq!(includes, json!({"users": [{"id": "u1", "username": "weather"}]}));
}

#[test]
fn test_accumulator_empty_session() {
    let mut sink = Accumulator::new(ReturnFormat::Hash);
    assert_eq!(
        sink.finish(None).unwrap(),
        SearchResult::Collected {
            items: Vec::new(),
            includes: Default::default()
        }
    );
}

// ============================================================================
// Factory Tests
// ============================================================================

#[test]
fn test_build_sink_for_each_mode() {
    let dir = tempdir().unwrap();
    let config = OutputConfig::new(dir.path().join("out")).with_compress(true);

    let mut hash = build_sink(WriteMode::Hash, &config).unwrap();
    hash.write_page(&Query::new("rain"), &rain_page()).unwrap();
    assert!(matches!(
        hash.finish(None).unwrap(),
        SearchResult::Collected { .. }
    ));

    let mut json = build_sink(WriteMode::Json, &config).unwrap();
    assert!(matches!(
        json.finish(None).unwrap(),
        SearchResult::Serialized { .. }
    ));

    let mut files = build_sink(WriteMode::Files, &config).unwrap();
    files.write_page(&Query::new("rain"), &rain_page()).unwrap();
    assert_eq!(files.finish(None).unwrap(), SearchResult::Emitted);
    assert_eq!(std::fs::read_dir(&config.out_box).unwrap().count(), 1);
}

#[test]
fn test_output_config_default() {
    let config = OutputConfig::default();
    assert_eq!(config.out_box, std::path::PathBuf::from(DEFAULT_OUT_BOX));
    assert!(!config.compress);
}
