//! Execution engine module
//!
//! Both entry points feed the same field inferrer:
//! - [`analyze`] summarises a payload that is already in memory
//! - [`Sampler`] fetches a sample from the Data API and builds a [`SampleReport`]

mod types;

pub use types::{
    ReportField, RequestEcho, SampleOutcome, SampleReport, SampleStatus, NO_DATA_MESSAGE,
};

use crate::config::SampleRequest;
use crate::decode::{normalize_records, JsonDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::schema::{infer_fields, FieldSummary};
use serde_json::Value;
use tracing::{debug, info};

/// Summarise the records of a parsed payload
///
/// A payload that normalizes to zero records is an error here; callers that
/// want to report an empty sample use [`Sampler`] instead.
pub fn analyze(payload: Value) -> Result<Vec<FieldSummary>> {
    let records = normalize_records(payload);
    if records.is_empty() {
        return Err(Error::NoRecords);
    }

    let rows = infer_fields(&records);
    info!(
        "Inferred {} field paths from {} records",
        rows.len(),
        records.len()
    );
    Ok(rows)
}

/// Fetches a record sample from the Data API and summarises it
pub struct Sampler {
    client: HttpClient,
    decoder: JsonDecoder,
}

impl Sampler {
    /// Create a sampler over an HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            decoder: JsonDecoder::with_context("Response"),
        }
    }

    /// Build the request config for a sample fetch
    pub fn request_config(request: &SampleRequest) -> RequestConfig {
        let mut config = RequestConfig::new()
            .query("limit", request.limit.to_string())
            .query("skip", "0")
            .query("query", request.query.to_string())
            .query("sort", request.sort.to_string())
            .header("Accept", "application/json")
            .bearer(&request.token);

        if let Some(fields) = &request.fields {
            config = config.query("fields", fields.clone());
        }

        config
    }

    /// Fetch the raw payload for a request
    pub async fn fetch(&self, request: &SampleRequest) -> Result<Value> {
        info!(
            "Fetching up to {} records from {}",
            request.limit, request.endpoint
        );
        let body = self
            .client
            .get_text(&request.endpoint, Self::request_config(request))
            .await?;
        debug!("Received {} bytes", body.len());
        self.decoder.decode_raw(&body)
    }

    /// Fetch a sample and build its report
    ///
    /// An empty sample is not an error; the report carries `no-data` status.
    pub async fn run(&self, request: &SampleRequest) -> Result<SampleOutcome> {
        let payload = self.fetch(request).await?;
        let records = normalize_records(payload.clone());

        let rows = if records.is_empty() {
            info!("No records returned for {}", request.collection);
            Vec::new()
        } else {
            infer_fields(&records)
        };

        let report = SampleReport::new(request, records.len(), rows);
        Ok(SampleOutcome { payload, report })
    }
}
