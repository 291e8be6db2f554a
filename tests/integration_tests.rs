//! Integration tests using mock HTTP server
//!
//! Tests the full flows: payload text → records → field summaries, and
//! settings → Data API request → sample report → output files.

use field_presence::config::{EnvSource, SampleOptions, ENV_FILE_NAME};
use field_presence::decode::{JsonDecoder, RecordDecoder};
use field_presence::engine::{analyze, Sampler, SampleStatus, NO_DATA_MESSAGE};
use field_presence::http::HttpClient;
use field_presence::output::{render_tsv, write_json_file};
use field_presence::{infer_fields, Error, ErrorCategory, FieldInferrer, Nullability, ValueType};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Inference Flow Tests
// ============================================================================

#[test]
fn test_infer_from_text_payload() {
    let text = r#"{
        "data": [
            {"id": 1, "name": "A", "tags": [{"k": "x"}, {"k": null}]},
            {"id": 2, "name": null, "tags": []},
            {"id": 3.5},
            "garbage"
        ]
    }"#;

    let records = JsonDecoder::new().decode(text).unwrap();
    assert_eq!(records.len(), 4);

    let rows = infer_fields(&records);
    let tsv = render_tsv(&rows);

    let expected = "\
field\tpresence_ratio\tpresent_records\ttotal_records\ttypes\tnullability
id\t0.75\t3\t4\tinteger|number\tnon-null in sample
name\t0.5\t2\t4\tnull|string\tnullable in sample
tags\t0.5\t2\t4\tarray\tnon-null in sample
tags[]\t0.25\t1\t4\tobject\tnon-null in sample
tags[].k\t0.25\t1\t4\tnull|string\tnullable in sample
";
    assert_eq!(tsv, expected);
}

#[test]
fn test_path_collapsing_across_records() {
    let rows = analyze(json!([
        {"a": [{"b": 1}, {"b": null}]},
        {"a": [{"b": 2}]}
    ]))
    .unwrap();

    let b: Vec<_> = rows.iter().filter(|r| r.field == "a[].b").collect();
    assert_eq!(b.len(), 1);
    assert_eq!(b[0].present_records, 2);
    assert_eq!(b[0].inferred_types, vec![ValueType::Integer, ValueType::Null]);
    assert_eq!(b[0].nullability, Nullability::Nullable);
}

#[test]
fn test_streaming_large_input() {
    let mut inferrer = FieldInferrer::new();
    for i in 0..1000 {
        let record = if i % 4 == 0 {
            json!({"id": i, "opt": null})
        } else {
            json!({"id": i})
        };
        inferrer.observe(&record);
    }

    let rows = inferrer.summarize();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].field, "opt");
    assert_eq!(rows[1].present_records, 250);
    assert_eq!(rows[1].presence_ratio, 0.25);
    assert_eq!(rows[1].nullability, Nullability::AlwaysNull);
}

#[test]
fn test_analyze_rejects_empty_input() {
    let err = analyze(json!({"records": []})).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Input);
    assert!(err.to_string().starts_with("No records found."));
}

// ============================================================================
// Sampling Flow Tests
// ============================================================================

fn write_env_file(dir: &std::path::Path, base_url: &str) {
    let content = format!(
        "# local settings\nCORVA_BEARER_TOKEN=file-$token\nCORVA_DATA_API_BASE_URL={base_url}\nCORVA_COLLECTION=wits\n"
    );
    std::fs::write(dir.join(ENV_FILE_NAME), content).unwrap();
}

#[tokio::test]
async fn test_sample_end_to_end_with_env_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/data/corva/wits/"))
        .and(query_param("limit", "3"))
        .and(query_param("skip", "0"))
        .and(query_param("query", r#"{"asset_id":99}"#))
        .and(query_param("sort", r#"{"timestamp":-1,"company_id":1}"#))
        .and(header("Authorization", "Bearer file-$token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"timestamp": 1700000000, "data": {"hole_depth": 1000.5}},
                {"timestamp": 1700000001, "data": {"hole_depth": null}}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_env_file(dir.path(), &format!("{}/", mock_server.uri()));

    let options = SampleOptions {
        app_root: Some(dir.path().to_path_buf()),
        asset_id: Some("99".to_string()),
        sort_json: Some(r#"{"timestamp":-1,"company_id":1}"#.to_string()),
        limit: Some("3.0".to_string()),
        ..Default::default()
    };
    let env = EnvSource::new(
        HashMap::new(),
        field_presence::config::load_env_file(&dir.path().join(ENV_FILE_NAME)).unwrap(),
    );
    let request = options.resolve(&env).unwrap();

    let sampler = Sampler::new(HttpClient::new().unwrap());
    let outcome = sampler.run(&request).await.unwrap();

    assert_eq!(outcome.report.status, SampleStatus::HasData);
    assert_eq!(outcome.report.records_count, 2);

    let summary_path = dir.path().join("summary.json");
    let raw_path = dir.path().join("raw.json");
    write_json_file(&summary_path, &outcome.report).unwrap();
    write_json_file(&raw_path, &outcome.payload).unwrap();

    let summary: Value =
        serde_json::from_str(&std::fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary["request"]["query"], json!({"asset_id": 99}));
    assert_eq!(summary["request"]["fields"], json!(null));
    assert_eq!(
        summary["request"]["sort"].to_string(),
        r#"{"timestamp":-1,"company_id":1}"#
    );
    assert_eq!(summary["fields"][1]["field"], "data.hole_depth");
    assert_eq!(summary["fields"][1]["inferred_types"], json!(["null", "number"]));
    assert_eq!(summary["fields"][1]["nullability"], "nullable in sample");

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&raw_path).unwrap()).unwrap();
    assert_eq!(raw["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sample_empty_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/data/acme/empty/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
        .mount(&mock_server)
        .await;

    let options = SampleOptions {
        token: Some("t".to_string()),
        base_url: Some(mock_server.uri()),
        provider: Some("acme".to_string()),
        collection: Some("empty".to_string()),
        query_json: Some(r#"{"company_id": 1}"#.to_string()),
        ..Default::default()
    };
    let request = options.resolve(&EnvSource::default()).unwrap();

    let outcome = Sampler::new(HttpClient::new().unwrap())
        .run(&request)
        .await
        .unwrap();

    let report = serde_json::to_value(&outcome.report).unwrap();
    assert_eq!(report["status"], "no-data");
    assert_eq!(report["records_count"], 0);
    assert_eq!(report["no_data_message"], NO_DATA_MESSAGE);
    assert_eq!(report["fields"], json!([]));
}

#[tokio::test]
async fn test_sample_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = SampleOptions {
        token: Some("t".to_string()),
        base_url: Some(mock_server.uri()),
        collection: Some("wits".to_string()),
        asset_id: Some("1".to_string()),
        ..Default::default()
    };
    let request = options.resolve(&EnvSource::default()).unwrap();

    let err = Sampler::new(HttpClient::new().unwrap())
        .run(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert_eq!(err.category(), ErrorCategory::Transport);
}

#[test]
fn test_sample_missing_settings_is_configuration_error() {
    let err = SampleOptions::default()
        .resolve(&EnvSource::default())
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}
