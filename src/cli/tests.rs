//! Tests for cli module

use super::*;
use crate::config::SearchConfig;
use crate::engine::{SessionOutcome, SessionStats};
use crate::output::SearchResult;
use crate::pagination::Includes;
use crate::types::WriteMode;
use chrono::{TimeZone, Utc};
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;

fn args(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        ..Default::default()
    }
}

fn outcome(newest_id: Option<&str>, result: SearchResult) -> SessionOutcome {
    SessionOutcome {
        result,
        newest_id: newest_id.map(ToString::to_string),
        stats: SessionStats::default(),
    }
}

// ============================================================================
// Argument Parsing Tests
// ============================================================================

#[test]
fn test_parse_search_flags() {
    let cli = Cli::try_parse_from([
        "search-tweets",
        "-c",
        "config.yaml",
        "search",
        "-q",
        "snow has:media",
        "-s",
        "2020-01-06 17:00",
        "-e",
        "12h",
        "-m",
        "50",
        "-x",
        "3",
        "-w",
        "json",
        "-t",
        "weather",
        "-p",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("config.yaml")));
    assert!(!cli.verbose);
    let Commands::Search { args, poll } = cli.command else {
        panic!("Expected search");
    };
    assert!(poll);
    assert_eq!(args.query, "snow has:media");
    assert_eq!(args.start_time.as_deref(), Some("2020-01-06 17:00"));
    assert_eq!(args.end_time.as_deref(), Some("12h"));
    assert_eq!(args.max_results, Some(50));
    assert_eq!(args.exit_after, Some(3));
    assert_eq!(args.write.as_deref(), Some("json"));
    assert_eq!(args.tag.as_deref(), Some("weather"));
    assert!(!args.zip);
}

#[test]
fn test_parse_poll_defaults() {
    let cli = Cli::try_parse_from(["search-tweets", "poll", "-q", "rain", "-v"]).unwrap();
    assert!(cli.verbose);
    let Commands::Poll {
        args,
        interval,
        cycles,
    } = cli.command
    else {
        panic!("Expected poll");
    };
    assert_eq!(args.query, "rain");
    assert!((interval - 5.0).abs() < f64::EPSILON);
    assert!(cycles.is_none());
}

#[test]
fn test_query_is_required() {
    assert!(Cli::try_parse_from(["search-tweets", "search"]).is_err());
}

// ============================================================================
// Override Tests
// ============================================================================

#[test]
fn test_outbox_forces_files_mode() {
    let mut config = SearchConfig::default();
    let args = SearchArgs {
        write: Some("json".to_string()),
        outbox: Some(PathBuf::from("/tmp/out")),
        zip: true,
        ..args("rain")
    };
    apply_overrides(&mut config, &args).unwrap();

    assert_eq!(config.write_mode().unwrap(), WriteMode::Files);
    let output = config.output_config();
    assert_eq!(output.out_box, PathBuf::from("/tmp/out"));
    assert!(output.compress);
}

#[test]
fn test_overrides_replace_config_values() {
    let mut config = SearchConfig::from_yaml_str(
        "options:\n  max_results: 10\n  exit_after: 2\n  write_mode: hash\n",
    )
    .unwrap();
    let args = SearchArgs {
        max_results: Some(80),
        exit_after: Some(9),
        ..args("rain")
    };
    apply_overrides(&mut config, &args).unwrap();

    assert_eq!(config.options.max_results, Some(80));
    assert_eq!(config.options.exit_after, Some(9));
    assert_eq!(config.write_mode().unwrap(), WriteMode::Hash);
}

#[test]
fn test_invalid_write_mode_rejected() {
    let mut config = SearchConfig::default();
    let args = SearchArgs {
        write: Some("carrier-pigeon".to_string()),
        ..args("rain")
    };
    assert!(apply_overrides(&mut config, &args).is_err());
}

#[test]
fn test_tag_goes_on_first_query() {
    let queries = build_queries(&SearchArgs {
        tag: Some("weather".to_string()),
        ..args("rain")
    })
    .unwrap();
    let first = queries.iter().next().unwrap();
    assert_eq!(first.value, "rain");
    assert_eq!(first.tag.as_deref(), Some("weather"));
}

#[test]
fn test_build_range() {
    let now = Utc.with_ymd_and_hms(2020, 5, 12, 12, 0, 0).unwrap();
    let range = build_range(
        &SearchArgs {
            start_time: Some("202005101200".to_string()),
            end_time: Some("1h".to_string()),
            since_id: Some("10".to_string()),
            until_id: Some("20".to_string()),
            ..args("rain")
        },
        now,
    )
    .unwrap();

    assert_eq!(
        range.start_time,
        Some(Utc.with_ymd_and_hms(2020, 5, 10, 12, 0, 0).unwrap())
    );
    assert_eq!(
        range.end_time,
        Some(Utc.with_ymd_and_hms(2020, 5, 12, 11, 0, 0).unwrap())
    );
    assert_eq!(range.since_id.as_deref(), Some("10"));
    assert_eq!(range.until_id.as_deref(), Some("20"));
}

#[test]
fn test_build_range_rejects_bad_time() {
    let result = build_range(
        &SearchArgs {
            start_time: Some("yesterday-ish".to_string()),
            ..args("rain")
        },
        Utc::now(),
    );
    assert!(result.is_err());
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    let err = load_config(Some(&missing)).unwrap_err();
    assert!(err.to_string().starts_with("Loading config "));
    assert!(err.to_string().contains("File not found"));
}

// ============================================================================
// Result Tests
// ============================================================================

#[test]
fn test_newest_of_prefers_numerically_largest() {
    let outcomes = vec![
        outcome(Some("999"), SearchResult::Emitted),
        outcome(Some("1000"), SearchResult::Emitted),
        outcome(None, SearchResult::Emitted),
        outcome(Some("0"), SearchResult::Emitted),
    ];
    assert_eq!(newest_of(&outcomes).as_deref(), Some("1000"));
    assert_eq!(newest_of(&[]), None);
}

#[test]
fn test_render_emitted_prints_nothing() {
    let rendered = render_result(&outcome(Some("1"), SearchResult::Emitted)).unwrap();
    assert!(rendered.is_none());
}

#[test]
fn test_render_collected_and_serialized_agree() {
    let includes = Includes {
        users: vec![json!({"id": "u1"})],
        ..Default::default()
    };
    let collected = outcome(
        Some("5"),
        SearchResult::Collected {
            items: vec![json!({"id": "5"})],
            includes: includes.clone(),
        },
    );
    let serialized = outcome(
        Some("5"),
        SearchResult::Serialized {
            items: "[{\"id\":\"5\"}]".to_string(),
            includes: serde_json::to_string(&includes).unwrap(),
        },
    );

    let a = render_result(&collected).unwrap().unwrap();
    let b = render_result(&serialized).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&a).unwrap();
    assert_eq!(
        value,
        json!({"data": [{"id": "5"}], "includes": {"users": [{"id": "u1"}]}, "newest_id": "5"})
    );
    assert_eq!(a, b);
}
