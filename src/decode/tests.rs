//! Tests for decoder module

use super::*;
use crate::error::Error;
use serde_json::{json, Value};
use test_case::test_case;

// ============================================================================
// Normalization Tests
// ============================================================================

#[test]
fn test_normalize_array() {
    let records = normalize_records(json!([{"id": 1}, {"id": 2}, 3]));
    assert_eq!(records.len(), 3);
    assert_eq!(records[2], json!(3));
}

#[test]
fn test_normalize_data_key() {
    let records = normalize_records(json!({"data": [{"id": 1}], "records": [1, 2, 3]}));
    assert_eq!(records, vec![json!({"id": 1})]);
}

#[test]
fn test_normalize_records_key() {
    let records = normalize_records(json!({"records": [{"id": 1}, {"id": 2}]}));
    assert_eq!(records.len(), 2);
}

#[test]
fn test_normalize_non_list_data_falls_through() {
    let records = normalize_records(json!({"data": {"id": 1}, "records": [{"id": 2}]}));
    assert_eq!(records, vec![json!({"id": 2})]);

    let payload = json!({"data": "x", "total": 1});
    let records = normalize_records(payload.clone());
    assert_eq!(records, vec![payload]);
}

#[test]
fn test_normalize_single_object() {
    let payload = json!({"id": 1, "name": "well"});
    assert_eq!(normalize_records(payload.clone()), vec![payload]);
}

#[test_case(json!(null) ; "null")]
#[test_case(json!(42) ; "number")]
#[test_case(json!("text") ; "string")]
#[test_case(json!(true) ; "boolean")]
fn test_normalize_scalar_is_empty(payload: Value) {
    assert!(normalize_records(payload).is_empty());
}

// ============================================================================
// JsonDecoder Tests
// ============================================================================

#[test]
fn test_json_decoder_decode() {
    let decoder = JsonDecoder::new();
    let records = decoder.decode(r#"{"data": [{"a": 1}, {"a": 2}]}"#).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_json_decoder_decode_raw() {
    let decoder = JsonDecoder::new();
    let raw = decoder.decode_raw(r#"{"data": []}"#).unwrap();
    assert_eq!(raw, json!({"data": []}));
}

#[test]
fn test_json_decoder_invalid_json() {
    let decoder = JsonDecoder::with_context("Response");
    let err = decoder.decode("not json").unwrap_err();
    assert!(matches!(err, Error::InvalidJson { .. }));
    assert!(err.to_string().starts_with("Response is not valid JSON"));
}

#[test]
fn test_parse_payload_default_context() {
    let err = parse_payload("{", "Input").unwrap_err();
    assert!(err.to_string().starts_with("Input is not valid JSON"));
}
