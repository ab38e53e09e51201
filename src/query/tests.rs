//! Tests for query module

use super::*;
use crate::error::Error;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_file_prefix_keeps_alphanumerics() {
    let query = Query::new("(snow OR weather) (colorado OR #COWX)");
    assert_eq!(query.file_prefix(), "snowORweat");

    let short = Query::new("#rain");
    assert_eq!(short.file_prefix(), "rain");
}

#[test]
fn test_add_and_delete_query() {
    let mut set = QuerySet::new();
    set.add_query("snow", None);
    set.add_query("rain", Some("weather".to_string()));
    set.add_query("snow", Some("again".to_string()));
    assert_eq!(set.len(), 3);

    set.delete_query("snow");
    assert_eq!(set.len(), 1);
    assert_eq!(set.queries[0], Query::tagged("rain", "weather"));
}

#[test]
fn test_tag_first() {
    let mut set = QuerySet::new();
    set.add_query("snow", None);
    set.add_query("rain", None);
    set.tag_first("cli-tag");

    assert_eq!(set.queries[0].tag.as_deref(), Some("cli-tag"));
    assert!(set.queries[1].tag.is_none());
}

#[test]
fn test_to_json_omits_missing_tags() {
    let mut set = QuerySet::new();
    set.add_query("snow", None);
    set.add_query("rain", Some("wet".to_string()));

    let json: serde_json::Value = serde_json::from_str(&set.to_json()).unwrap();
    assert_eq!(json["queries"][0], serde_json::json!({"value": "snow"}));
    assert_eq!(
        json["queries"][1],
        serde_json::json!({"value": "rain", "tag": "wet"})
    );
}

#[test]
fn test_load_yaml_str() {
    let yaml = r#"
queries:
  - value: "(snow OR hail) has:media"
    tag: storms
  - value: "rain -is:retweet"
"#;
    let set = load_queries_from_str(yaml, QueryFormat::Yaml).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.queries[0].tag.as_deref(), Some("storms"));
    assert!(set.queries[1].tag.is_none());
}

#[test]
fn test_load_json_str() {
    let json = r#"{"queries": [{"value": "snow", "tag": "cold"}]}"#;
    let set = load_queries_from_str(json, QueryFormat::Json).unwrap();
    assert_eq!(set.queries, vec![Query::tagged("snow", "cold")]);
}

#[test]
fn test_blank_query_rejected() {
    let json = r#"{"queries": [{"value": "snow"}, {"value": "  "}]}"#;
    let err = load_queries_from_str(json, QueryFormat::Json).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "queries[1].value"));
}

#[test]
fn test_from_arg_inline() {
    let set = QuerySet::from_arg("snow has:images").unwrap();
    assert_eq!(set.queries, vec![Query::new("snow has:images")]);
}

#[test]
fn test_from_arg_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "queries:\n  - value: snow\n    tag: cold").unwrap();

    let set = QuerySet::from_arg(file.path().to_str().unwrap()).unwrap();
    assert_eq!(set.queries, vec![Query::tagged("snow", "cold")]);
}

#[test]
fn test_load_json_appends() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"queries": [{{"value": "hail"}}]}}"#).unwrap();

    let mut set = QuerySet::new();
    set.add_query("snow", None);
    set.load_json(file.path()).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.queries[1].value, "hail");
}

#[test]
fn test_missing_file() {
    let err = load_queries("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[test]
fn test_unknown_extension() {
    let file = NamedTempFile::new().unwrap();
    assert!(load_queries(file.path()).is_err());
}

#[test]
fn test_format_detection() {
    use std::path::Path;
    assert_eq!(
        QueryFormat::from_path(Path::new("q.YML")),
        Some(QueryFormat::Yaml)
    );
    assert_eq!(
        QueryFormat::from_path(Path::new("q.json")),
        Some(QueryFormat::Json)
    );
    assert_eq!(QueryFormat::from_path(Path::new("snow OR rain")), None);
}
