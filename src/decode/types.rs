//! Decoder traits

use crate::error::Result;
use serde_json::Value;

/// Keys checked, in order, for a record list inside an object payload
pub const RECORD_LIST_KEYS: [&str; 2] = ["data", "records"];

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the body into a normalized list of records
    fn decode(&self, body: &str) -> Result<Vec<Value>>;

    /// Decode the body into a single JSON value (full payload)
    fn decode_raw(&self, body: &str) -> Result<Value>;
}
