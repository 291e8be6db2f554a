//! Engine types
//!
//! Report documents produced by the sampling entry point.

use crate::config::SampleRequest;
use crate::schema::{FieldSummary, Nullability, ValueType};
use serde::Serialize;
use serde_json::Value;

/// Message reported when a sample comes back empty
pub const NO_DATA_MESSAGE: &str =
    "No data was found for this collection and asset in the selected environment.";

/// Whether the sample contained any records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleStatus {
    HasData,
    NoData,
}

/// Request parameters echoed back in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEcho {
    pub provider: String,
    pub collection: String,
    pub limit: u64,
    pub query: Value,
    pub sort: Value,
    pub fields: Option<String>,
}

impl From<&SampleRequest> for RequestEcho {
    fn from(request: &SampleRequest) -> Self {
        Self {
            provider: request.provider.clone(),
            collection: request.collection.clone(),
            limit: request.limit,
            query: request.query.clone(),
            sort: request.sort.clone(),
            fields: request.fields.clone(),
        }
    }
}

/// A field summary row as it appears in a sample report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportField {
    pub field: String,
    /// Always `inferred`: the rows come from observation, not a declared schema
    pub meaning_confidence: &'static str,
    #[serde(serialize_with = "crate::schema::serialize_ratio")]
    pub presence_ratio: f64,
    pub present_records: usize,
    pub total_records: usize,
    pub inferred_types: Vec<ValueType>,
    pub nullability: Nullability,
}

impl From<FieldSummary> for ReportField {
    fn from(summary: FieldSummary) -> Self {
        Self {
            field: summary.field,
            meaning_confidence: "inferred",
            presence_ratio: summary.presence_ratio,
            present_records: summary.present_records,
            total_records: summary.total_records,
            inferred_types: summary.inferred_types,
            nullability: summary.nullability,
        }
    }
}

/// Summary document for one sample fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleReport {
    pub status: SampleStatus,
    pub endpoint: String,
    pub request: RequestEcho,
    pub records_count: usize,
    pub no_data_message: Option<&'static str>,
    pub fields: Vec<ReportField>,
}

impl SampleReport {
    /// Build a report from a request and the rows inferred for its records
    pub fn new(request: &SampleRequest, records_count: usize, rows: Vec<FieldSummary>) -> Self {
        let has_data = records_count > 0;
        Self {
            status: if has_data {
                SampleStatus::HasData
            } else {
                SampleStatus::NoData
            },
            endpoint: request.endpoint.clone(),
            request: RequestEcho::from(request),
            records_count,
            no_data_message: if has_data { None } else { Some(NO_DATA_MESSAGE) },
            fields: rows.into_iter().map(ReportField::from).collect(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.status == SampleStatus::HasData
    }
}

/// Result of a sample run
#[derive(Debug, Clone)]
pub struct SampleOutcome {
    /// Response payload as returned by the API
    pub payload: Value,
    /// Summary document
    pub report: SampleReport,
}
