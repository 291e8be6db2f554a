//! Field inference over JSON records

use super::types::{FieldStats, FieldSummary, ValueType};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Paths already counted for the record currently being walked
#[derive(Debug, Default)]
struct RecordScope {
    present: HashSet<String>,
    null: HashSet<String>,
    non_null: HashSet<String>,
}

/// Streaming field inferrer
///
/// Records are fed one at a time with [`FieldInferrer::observe`]; only the
/// per-path statistics survive between records, so inputs never need to be
/// materialised in full.
#[derive(Debug, Clone, Default)]
pub struct FieldInferrer {
    /// Every record observed, object-shaped or not
    total_records: usize,
    /// Statistics keyed by field path; `String` ordering is byte order
    fields: BTreeMap<String, FieldStats>,
}

impl FieldInferrer {
    /// Create an empty inferrer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records observed so far
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Statistics for a field path, if it has been seen
    pub fn stats(&self, path: &str) -> Option<&FieldStats> {
        self.fields.get(path)
    }

    /// Observe one record
    ///
    /// Every record counts toward the total. Only objects contribute field
    /// statistics; scalars, arrays and nulls are skipped.
    pub fn observe(&mut self, record: &Value) {
        self.total_records += 1;

        let Value::Object(map) = record else {
            debug!(
                "Skipping non-object record #{} ({})",
                self.total_records,
                ValueType::of(record)
            );
            return;
        };

        let mut scope = RecordScope::default();
        for (key, value) in map {
            self.walk(&mut scope, value, key);
        }
    }

    /// Observe every record of a slice
    pub fn observe_all<'a>(&mut self, records: impl IntoIterator<Item = &'a Value>) {
        for record in records {
            self.observe(record);
        }
    }

    /// Derive summary rows, sorted by field path
    pub fn summarize(&self) -> Vec<FieldSummary> {
        self.fields
            .iter()
            .map(|(path, stats)| FieldSummary::from_stats(path.as_str(), stats, self.total_records))
            .collect()
    }

    fn walk(&mut self, scope: &mut RecordScope, value: &Value, path: &str) {
        self.mark(scope, value, path);

        match value {
            Value::Array(items) => {
                let item_path = format!("{path}[]");
                for item in items.iter().filter(|item| item.is_object()) {
                    self.walk(scope, item, &item_path);
                }
            }
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    self.walk(scope, child, &child_path);
                }
            }
            // Null and scalars are leaves
            _ => {}
        }
    }

    fn mark(&mut self, scope: &mut RecordScope, value: &Value, path: &str) {
        let stats = self.fields.entry(path.to_string()).or_default();

        if scope.present.insert(path.to_string()) {
            stats.present_records += 1;
        }

        if value.is_null() {
            if scope.null.insert(path.to_string()) {
                stats.null_records += 1;
            }
        } else if scope.non_null.insert(path.to_string()) {
            stats.non_null_records += 1;
        }

        stats.types.insert(ValueType::of(value));
    }
}

/// Infer field summaries for a list of records (convenience function)
pub fn infer_fields(records: &[Value]) -> Vec<FieldSummary> {
    let mut inferrer = FieldInferrer::new();
    inferrer.observe_all(records);
    inferrer.summarize()
}
