//! HTTP client module
//!
//! Provides the HTTP client used to pull sample records from the Data API.
//!
//! # Features
//!
//! - **Request Config**: Ordered query parameters, headers and bearer auth per request
//! - **Error Classification**: Non-success statuses carry a truncated body

mod client;

pub use client::{truncate_body, HttpClient, HttpClientConfig, RequestConfig, ERROR_BODY_LIMIT};
