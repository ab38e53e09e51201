//! Tests for request module

use super::*;
use crate::query::Query;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.as_str())
}

// ============================================================================
// Builder Tests
// ============================================================================

#[test]
fn test_minimal_request_omits_absent_fields() {
    let builder = RequestParameterBuilder::new();
    let request = builder.build(&Query::new("rain"), &RequestRange::new(), None);

    let params = request.to_params();
    assert_eq!(
        params,
        vec![
            ("query", "rain".to_string()),
            ("max_results", "100".to_string()),
        ]
    );
    assert!(request.is_first_page());
}

#[test]
fn test_full_request() {
    let fields = FieldSelection {
        tweet: Some("id,created_at,author_id,text".to_string()),
        user: Some("username".to_string()),
        ..Default::default()
    };
    let builder = RequestParameterBuilder::new()
        .with_max_results(50)
        .with_expansions("author_id")
        .with_fields(fields);

    let range = RequestRange::new()
        .with_start_time(Utc.with_ymd_and_hms(2020, 1, 6, 17, 0, 0).unwrap())
        .with_end_time(Utc.with_ymd_and_hms(2020, 1, 10, 17, 0, 0).unwrap())
        .with_since_id("100")
        .with_until_id("900");

    let request = builder.build(&Query::new("snow"), &range, Some("abc"));
    let params = request.to_params();

    assert_eq!(param(&params, "start_time"), Some("2020-01-06T17:00:00Z"));
    assert_eq!(param(&params, "end_time"), Some("2020-01-10T17:00:00Z"));
    assert_eq!(param(&params, "since_id"), Some("100"));
    assert_eq!(param(&params, "until_id"), Some("900"));
    assert_eq!(param(&params, "max_results"), Some("50"));
    assert_eq!(param(&params, "expansions"), Some("author_id"));
    assert_eq!(
        param(&params, "tweet.fields"),
        Some("id,created_at,author_id,text")
    );
    assert_eq!(param(&params, "user.fields"), Some("username"));
    assert_eq!(param(&params, "media.fields"), None);
    assert_eq!(param(&params, "next_token"), Some("abc"));
    assert!(!request.is_first_page());
}

#[test]
fn test_max_results_override_and_ceiling() {
    let builder = RequestParameterBuilder::new().with_max_results(10);

    let session_default = builder.build(&Query::new("q"), &RequestRange::new(), None);
    assert_eq!(session_default.max_results, 10);

    let overridden = builder.build(
        &Query::new("q"),
        &RequestRange::new().with_max_results(25),
        None,
    );
    assert_eq!(overridden.max_results, 25);

    let too_big = builder.build(
        &Query::new("q"),
        &RequestRange::new().with_max_results(5000),
        None,
    );
    assert_eq!(too_big.max_results, MAX_RESULTS_LIMIT);

    let premium = RequestParameterBuilder::new()
        .with_max_results_limit(500)
        .with_max_results(500)
        .build(&Query::new("q"), &RequestRange::new(), None);
    assert_eq!(premium.max_results, 500);
}

#[test]
fn test_max_results_floor() {
    let builder = RequestParameterBuilder::new().with_max_results(1);
    let request = builder.build(&Query::new("q"), &RequestRange::new(), None);
    assert_eq!(request.max_results, MIN_RESULTS);

    let overridden = builder.build(
        &Query::new("q"),
        &RequestRange::new().with_max_results(0),
        None,
    );
    assert_eq!(overridden.max_results, 10);
}

#[test]
fn test_tag_stays_on_query() {
    let builder = RequestParameterBuilder::new();
    let request = builder.build(
        &Query::tagged("rain", "weather"),
        &RequestRange::new(),
        None,
    );

    assert_eq!(request.query.tag.as_deref(), Some("weather"));
    assert!(request.to_params().iter().all(|(name, _)| *name != "tag"));
}

#[test]
fn test_empty_field_strings_are_not_sent() {
    let fields = FieldSelection {
        tweet: Some(String::new()),
        poll: Some("options".to_string()),
        ..Default::default()
    };
    let request = RequestParameterBuilder::new()
        .with_fields(fields)
        .with_expansions("")
        .build(&Query::new("q"), &RequestRange::new(), None);

    let params = request.to_params();
    assert_eq!(param(&params, "tweet.fields"), None);
    assert_eq!(param(&params, "expansions"), None);
    assert_eq!(param(&params, "poll.fields"), Some("options"));
}

#[test]
fn test_builds_are_identical_for_identical_inputs() {
    let builder = RequestParameterBuilder::new().with_expansions("author_id");
    let range = RequestRange::new().with_since_id("7");
    let first = builder.build(&Query::new("q"), &range, Some("t1"));
    let second = builder.build(&Query::new("q"), &range, Some("t1"));
    assert_eq!(first, second);
}

#[test]
fn test_archive_request_uses_tier_names() {
    let fields = FieldSelection {
        tweet: Some("id,text".to_string()),
        ..Default::default()
    };
    let builder = RequestParameterBuilder::new()
        .with_wire_format(WireFormat::Archive)
        .with_max_results_limit(500)
        .with_max_results(500)
        .with_expansions("author_id")
        .with_fields(fields);

    let range = RequestRange::new()
        .with_start_time(Utc.with_ymd_and_hms(2020, 1, 6, 17, 0, 0).unwrap())
        .with_end_time(Utc.with_ymd_and_hms(2020, 1, 10, 17, 30, 45).unwrap())
        .with_since_id("100")
        .with_until_id("900");

    let request = builder.build(&Query::new("snow"), &range, Some("abc"));
    assert_eq!(
        request.to_params(),
        vec![
            ("query", "snow".to_string()),
            ("fromDate", "202001061700".to_string()),
            ("toDate", "202001101730".to_string()),
            ("maxResults", "500".to_string()),
            ("next", "abc".to_string()),
        ]
    );
}

#[test]
fn test_archive_first_page_has_no_token() {
    let request = RequestParameterBuilder::new()
        .with_wire_format(WireFormat::Archive)
        .build(&Query::new("rain"), &RequestRange::new(), None);

    let params = request.to_params();
    assert_eq!(param(&params, "maxResults"), Some("100"));
    assert_eq!(param(&params, "next"), None);
    assert_eq!(param(&params, "max_results"), None);
    assert_eq!(param(&params, "next_token"), None);
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_to_json_body() {
    let request = RequestParameterBuilder::new()
        .with_max_results(20)
        .build(
            &Query::new("rain"),
            &RequestRange::new().with_since_id("5"),
            Some("next"),
        );

    assert_eq!(
        request.to_json(),
        json!({
            "query": "rain",
            "since_id": "5",
            "max_results": 20,
            "next_token": "next"
        })
    );
}

#[test]
fn test_archive_json_body() {
    let request = RequestParameterBuilder::new()
        .with_wire_format(WireFormat::Archive)
        .with_max_results(20)
        .build(
            &Query::new("rain"),
            &RequestRange::new()
                .with_since_id("5")
                .with_start_time(Utc.with_ymd_and_hms(2020, 1, 6, 17, 0, 0).unwrap()),
            Some("tok"),
        );

    assert_eq!(
        request.to_json(),
        json!({
            "query": "rain",
            "fromDate": "202001061700",
            "maxResults": 20,
            "next": "tok"
        })
    );
}

#[test]
fn test_field_selection_from_yaml_keys() {
    let yaml = "tweet.fields: id,text\nplace.fields: full_name\n";
    let fields: FieldSelection = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(fields.tweet.as_deref(), Some("id,text"));
    assert_eq!(fields.place.as_deref(), Some("full_name"));
    assert!(fields.user.is_none());
}
