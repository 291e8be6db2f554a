//! Decoder implementations

use super::types::{RecordDecoder, RECORD_LIST_KEYS};
use crate::error::{Error, Result};
use serde_json::Value;

/// JSON decoder that normalizes payloads into record lists
#[derive(Debug, Clone)]
pub struct JsonDecoder {
    /// Name of the input, used in parse errors ("Input", "Response")
    context: String,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::with_context("Input")
    }

    /// Create a JSON decoder whose errors name the given input
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        self.decode_raw(body).map(normalize_records)
    }

    fn decode_raw(&self, body: &str) -> Result<Value> {
        parse_payload(body, &self.context)
    }
}

/// Parse text as JSON, naming the input in the error
pub fn parse_payload(text: &str, context: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::invalid_json(context, e))
}

/// Extract the list of records from an arbitrarily shaped payload
///
/// - a list is used as-is
/// - an object with a list under `data` (or else `records`) yields that list
/// - any other object is a single record
/// - scalars and null yield no records
pub fn normalize_records(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(records) => records,
        Value::Object(mut map) => {
            for key in RECORD_LIST_KEYS {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(records)) = map.remove(key) {
                        return records;
                    }
                }
            }
            vec![Value::Object(map)]
        }
        _ => Vec::new(),
    }
}
