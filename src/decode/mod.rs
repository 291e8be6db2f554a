//! Decoder module
//!
//! Parses JSON payloads and normalizes them into a list of records for the
//! field inference engine.

mod decoders;
mod types;

pub use decoders::{normalize_records, parse_payload, JsonDecoder};
pub use types::{RecordDecoder, RECORD_LIST_KEYS};

#[cfg(test)]
mod tests;
