//! Output module
//!
//! Renders field summaries and reports.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Tab-separated field summaries
//! - Pretty-printed JSON documents, to any writer or to a file

mod tsv;
mod writer;

pub use tsv::{render_tsv, write_tsv, TSV_HEADER};
pub use writer::{to_pretty_json, write_json, write_json_file};
