//! Field inference module
//!
//! Summarises which field paths occur across a set of JSON records.
//!
//! # Features
//!
//! - **Path Collapsing**: Nested objects become `a.b`, array elements `a[]`
//! - **Presence Counting**: Counts the records a path appears in, not occurrences
//! - **Type Tracking**: Collects every value type seen at a path
//! - **Nullable Detection**: Classifies paths as always null, nullable or non-null
//! - **Streaming**: Records can be observed one at a time

mod inference;
mod types;

pub use inference::{infer_fields, FieldInferrer};
pub use types::{presence_ratio, FieldStats, FieldSummary, Nullability, ValueType};
pub(crate) use types::serialize_ratio;
