//! Core data structures and types for ISD decoding.
//!
//! Defines decoded cell values, the QC triplet emitted per metric part,
//! cleaned output rows, row usability metrics and processing statistics.

use crate::constants::{
    ROW_HAS_ANY_USABLE_METRIC, SUFFIX_QC_PASS, SUFFIX_QC_REASON, USABLE_METRIC_COUNT,
    USABLE_METRIC_FRACTION,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A decoded output cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

/// QC status of a metric part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QcStatus {
    Pass,
    Invalid,
    Missing,
}

impl QcStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QcStatus::Pass => "PASS",
            QcStatus::Invalid => "INVALID",
            QcStatus::Missing => "MISSING",
        }
    }
}

/// Closed taxonomy of QC failure reasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QcReason {
    MalformedToken,
    BadQualityCode,
    OutOfRange,
    SentinelMissing,
    BadArity,
    UnknownIdentifier,
    BadDomain,
}

impl QcReason {
    pub const ALL: [QcReason; 7] = [
        QcReason::MalformedToken,
        QcReason::BadQualityCode,
        QcReason::OutOfRange,
        QcReason::SentinelMissing,
        QcReason::BadArity,
        QcReason::UnknownIdentifier,
        QcReason::BadDomain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QcReason::MalformedToken => "MALFORMED_TOKEN",
            QcReason::BadQualityCode => "BAD_QUALITY_CODE",
            QcReason::OutOfRange => "OUT_OF_RANGE",
            QcReason::SentinelMissing => "SENTINEL_MISSING",
            QcReason::BadArity => "BAD_ARITY",
            QcReason::UnknownIdentifier => "UNKNOWN_IDENTIFIER",
            QcReason::BadDomain => "BAD_DOMAIN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|reason| reason.as_str() == value)
    }
}

impl fmt::Display for QcReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(pass, status, reason)` triplet emitted for every metric part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcSignal {
    pub pass: bool,
    pub status: QcStatus,
    pub reason: Option<QcReason>,
}

impl QcSignal {
    pub fn passed() -> Self {
        Self {
            pass: true,
            status: QcStatus::Pass,
            reason: None,
        }
    }

    pub fn invalid(reason: QcReason) -> Self {
        Self {
            pass: false,
            status: QcStatus::Invalid,
            reason: Some(reason),
        }
    }

    pub fn missing() -> Self {
        Self {
            pass: false,
            status: QcStatus::Missing,
            reason: Some(QcReason::SentinelMissing),
        }
    }
}

/// Row-level usability rollup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowMetrics {
    pub usable_metric_count: usize,
    pub usable_metric_fraction: f64,
    pub row_has_any_usable_metric: bool,
}

impl RowMetrics {
    /// Build metrics from a usable count and the number of parts considered
    pub fn from_counts(usable: usize, considered: usize) -> Self {
        let fraction = if considered == 0 {
            0.0
        } else {
            usable as f64 / considered as f64
        };
        Self {
            usable_metric_count: usable,
            usable_metric_fraction: fraction,
            row_has_any_usable_metric: usable > 0,
        }
    }
}

/// A decoded observation row keyed by output column name
///
/// Columns are kept in a sorted map so that iteration order, and therefore
/// every serialised form of the row, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleanRow {
    columns: BTreeMap<String, Value>,
}

impl CleanRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.columns.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.columns.remove(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn extend(&mut self, other: CleanRow) {
        self.columns.extend(other.columns);
    }

    /// Numeric value of a column, if present and non-null
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }

    /// The QC pass flag for a part column
    pub fn qc_pass(&self, column: &str) -> Option<bool> {
        self.get(&format!("{column}{SUFFIX_QC_PASS}"))
            .and_then(Value::as_bool)
    }

    /// The QC reason for a part column
    pub fn qc_reason(&self, column: &str) -> Option<QcReason> {
        self.get(&format!("{column}{SUFFIX_QC_REASON}"))
            .and_then(Value::as_str)
            .and_then(QcReason::parse)
    }

    /// Row-level metrics, once the row engine has written them
    pub fn metrics(&self) -> Option<RowMetrics> {
        Some(RowMetrics {
            usable_metric_count: self.number(USABLE_METRIC_COUNT)? as usize,
            usable_metric_fraction: self.number(USABLE_METRIC_FRACTION)?,
            row_has_any_usable_metric: self.get(ROW_HAS_ANY_USABLE_METRIC)?.as_bool()?,
        })
    }
}

impl FromIterator<(String, Value)> for CleanRow {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Per-reason counts of failed QC triplets across a batch of rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QcSummary {
    pub signals: usize,
    pub passed: usize,
    pub failures: BTreeMap<QcReason, usize>,
}

impl QcSummary {
    /// Tally every QC triplet found in a decoded row
    pub fn record(&mut self, row: &CleanRow) {
        for (column, value) in row.iter() {
            if let Some(base) = column.strip_suffix(SUFFIX_QC_PASS) {
                self.signals += 1;
                if value.as_bool() == Some(true) {
                    self.passed += 1;
                } else if let Some(reason) = row.qc_reason(base) {
                    *self.failures.entry(reason).or_insert(0) += 1;
                }
            }
        }
    }

    pub fn merge(&mut self, other: QcSummary) {
        self.signals += other.signals;
        self.passed += other.passed;
        for (reason, count) in other.failures {
            *self.failures.entry(reason).or_insert(0) += count;
        }
    }

    pub fn failures_for(&self, reason: QcReason) -> usize {
        self.failures.get(&reason).copied().unwrap_or(0)
    }
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub rows_with_usable_metric: usize,
    pub qc_summary: QcSummary,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
