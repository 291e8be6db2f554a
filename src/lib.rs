// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # field-presence
//!
//! Field-level schema summaries for loosely structured JSON records.
//!
//! For every distinct field path across a set of records the engine reports
//! how many records contain it, which value types it takes and whether it is
//! nullable.
//!
//! ## Features
//!
//! - **Path Collapsing**: Nested objects become `a.b`, array elements `a[]`
//! - **Record-Scoped Counting**: Presence and nullness count records, not occurrences
//! - **Record Normalization**: Arrays, `data`/`records` envelopes or single objects
//! - **Data API Sampling**: Fetch a sample over HTTP and summarise it in one step
//!
//! ## Quick Start
//!
//! ```rust
//! use field_presence::schema::{infer_fields, Nullability};
//! use serde_json::json;
//!
//! let records = vec![json!({"x": 1}), json!({"x": null}), json!({})];
//! let rows = infer_fields(&records);
//!
//! assert_eq!(rows[0].field, "x");
//! assert_eq!(rows[0].presence_ratio, 0.6667);
//! assert_eq!(rows[0].nullability, Nullability::Nullable);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌────────────┐   ┌──────────────┐
//! │ config/http  │──▶│   decode   │──▶│   schema   │──▶│    output    │
//! │ file / stdin │   │ normalize  │   │  inferrer  │   │  TSV / JSON  │
//! └──────────────┘   └────────────┘   └────────────┘   └──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Field inference engine
pub mod schema;

/// Payload parsing and record normalization
pub mod decode;

/// Settings resolution for Data API sampling
pub mod config;

/// HTTP client for the Data API
pub mod http;

/// Entry points over the inference engine
pub mod engine;

/// TSV and JSON rendering
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorCategory, Result};
pub use schema::{infer_fields, FieldInferrer, FieldSummary, Nullability, ValueType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
