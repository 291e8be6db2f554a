//! Schema types

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// Inferred type of a single observed value
///
/// Variants are declared in label order so that a `BTreeSet<ValueType>`
/// iterates in the same order as the sorted labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl ValueType {
    /// Classify a JSON value
    ///
    /// Numbers are `integer` when they are mathematically whole, even if they
    /// were written as a float literal (`3.0`).
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    ValueType::Integer
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() && f.fract() == 0.0 => ValueType::Integer,
                        _ => ValueType::Number,
                    }
                }
            }
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Lowercase label used in every output format
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Array => "array",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Null => "null",
            ValueType::Number => "number",
            ValueType::Object => "object",
            ValueType::String => "string",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nullability classification of a field path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nullability {
    #[serde(rename = "always null in sample")]
    AlwaysNull,
    #[serde(rename = "nullable in sample")]
    Nullable,
    #[serde(rename = "non-null in sample")]
    NonNull,
}

impl Nullability {
    /// Derive the classification from record-scoped null/non-null counters
    pub fn classify(null_records: usize, non_null_records: usize) -> Self {
        match (null_records > 0, non_null_records > 0) {
            (true, false) => Nullability::AlwaysNull,
            (true, true) => Nullability::Nullable,
            (false, _) => Nullability::NonNull,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Nullability::AlwaysNull => "always null in sample",
            Nullability::Nullable => "nullable in sample",
            Nullability::NonNull => "non-null in sample",
        }
    }
}

impl std::fmt::Display for Nullability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics accumulated for one field path across all records
///
/// All three counters are record-scoped: a record bumps each of them at most
/// once, however many times the path occurs inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStats {
    /// Records in which the path appeared at least once
    pub present_records: usize,
    /// Records in which the path was null at least once
    pub null_records: usize,
    /// Records in which the path was non-null at least once
    pub non_null_records: usize,
    /// Every type ever observed at the path
    pub types: BTreeSet<ValueType>,
}

impl FieldStats {
    /// Nullability of this path
    pub fn nullability(&self) -> Nullability {
        Nullability::classify(self.null_records, self.non_null_records)
    }
}

/// One output row of the field summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    /// Field path (`a.b`, `a[].b`)
    pub field: String,
    /// `present_records / total_records`, rounded to 4 decimals
    #[serde(serialize_with = "serialize_ratio")]
    pub presence_ratio: f64,
    pub present_records: usize,
    pub total_records: usize,
    /// Observed types, sorted by label
    pub inferred_types: Vec<ValueType>,
    pub nullability: Nullability,
}

impl FieldSummary {
    /// Build a row from accumulated statistics
    pub fn from_stats(field: impl Into<String>, stats: &FieldStats, total_records: usize) -> Self {
        Self {
            field: field.into(),
            presence_ratio: presence_ratio(stats.present_records, total_records),
            present_records: stats.present_records,
            total_records,
            inferred_types: stats.types.iter().copied().collect(),
            nullability: stats.nullability(),
        }
    }

    /// Types joined with `|`, as used by the tabular output
    pub fn types_label(&self) -> String {
        self.inferred_types
            .iter()
            .map(ValueType::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Presence ratio rounded to 4 decimal places; zero when there are no records
pub fn presence_ratio(present: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to_4_places(present as f64 / total as f64)
}

/// Round a non-negative float half-up at the 4th decimal
///
/// Rounding works on the exact binary value, not on its shortest decimal
/// rendering: `3/160` is stored just below `0.01875` and rounds to `0.0187`,
/// while `1/32` is exactly `0.03125` and rounds to `0.0313`.
fn round_to_4_places(value: f64) -> f64 {
    let bits = value.to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1_u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1_u64 << 52), biased_exponent - 1075)
    };

    // whole numbers (and non-finite values) need no rounding
    if exponent >= 0 || !value.is_finite() {
        return value;
    }

    // floor(value * 10^5), exact: mantissa < 2^53 and 10^5 < 2^17
    let shift = exponent.unsigned_abs();
    let scaled = u128::from(mantissa) * 100_000;
    let fifth_places = if shift >= 128 { 0 } else { scaled >> shift };

    let rounded = (fifth_places + 5) / 10;
    rounded as f64 / 10_000.0
}

/// Serialize whole ratios as integers (`1` rather than `1.0`)
pub(crate) fn serialize_ratio<S: Serializer>(ratio: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if ratio.fract() == 0.0 {
        serializer.serialize_u64(*ratio as u64)
    } else {
        serializer.serialize_f64(*ratio)
    }
}
