//! Row engine: decodes one raw observation row into a cleaned row.
//!
//! Columns are visited in sorted order so the output is deterministic. Control
//! columns are normalised, recognised identifiers go through the
//! [`FieldAssembler`], `REM`/`QNN` are split by their grammars, and the row is
//! finished with the usability metrics. Field columns are written under their
//! friendly names; only the arity entry keeps its internal key.

use super::control::{self, TIMESTAMP_COLUMN, is_control_column, normalise_control};
use super::field::FieldAssembler;
use super::part::parse_numeric;
use super::remarks::{parse_qnn, parse_remarks};
use crate::catalogue::RuleCatalogue;
use crate::config::{IsdConfig, Strictness};
use crate::constants::{
    ADD_MARKER, QNN_COLUMN, REMARKS_COLUMN, ROW_HAS_ANY_USABLE_METRIC, STRICT_LOG_PREFIX,
    SUFFIX_QC_PASS, USABLE_METRIC_COUNT, USABLE_METRIC_FRACTION, control as columns,
};
use crate::models::{CleanRow, QcReason, RowMetrics, Value};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use tracing::warn;

/// Raw observation row: column name to cell text
pub type RawRow = BTreeMap<String, String>;

/// Decodes raw rows against a shared catalogue
#[derive(Debug, Clone, Copy)]
pub struct RowDecoder<'c> {
    catalogue: &'c RuleCatalogue,
    assembler: FieldAssembler<'c>,
    drop_raw_columns: bool,
    keep_remarks: bool,
}

impl<'c> RowDecoder<'c> {
    pub fn new(catalogue: &'c RuleCatalogue, strictness: Strictness) -> Self {
        Self {
            catalogue,
            assembler: FieldAssembler::new(catalogue, strictness),
            drop_raw_columns: false,
            keep_remarks: true,
        }
    }

    /// Decoder configured from the processing options
    pub fn from_config(catalogue: &'c RuleCatalogue, config: &IsdConfig) -> Self {
        Self::new(catalogue, config.strictness)
            .with_drop_raw_columns(config.drop_raw_columns)
            .with_remarks(config.keep_remarks)
    }

    pub fn with_drop_raw_columns(mut self, drop: bool) -> Self {
        self.drop_raw_columns = drop;
        self
    }

    pub fn with_remarks(mut self, keep: bool) -> Self {
        self.keep_remarks = keep;
        self
    }

    pub fn strictness(&self) -> Strictness {
        self.assembler.strictness()
    }

    pub fn catalogue(&self) -> &'c RuleCatalogue {
        self.catalogue
    }

    pub fn assembler(&self) -> &FieldAssembler<'c> {
        &self.assembler
    }

    /// Decode one row. Never fails: bad cells become QC signals or nulls.
    pub fn decode_row<K, V>(&self, row: &BTreeMap<K, V>) -> CleanRow
    where
        K: Borrow<str> + Ord,
        V: AsRef<str>,
    {
        let mut out = CleanRow::new();
        let mut fallback = FallbackCounts::default();

        self.decode_control(row, &mut out);

        for (column, raw) in row {
            let column: &str = column.borrow();
            let raw = raw.as_ref();
            if is_control_column(column) {
                continue;
            }
            match column {
                ADD_MARKER if matches!(raw.trim(), "" | ADD_MARKER) => {}
                REMARKS_COLUMN => self.decode_free_text(column, raw, parse_remarks, &mut out),
                QNN_COLUMN => self.decode_free_text(column, raw, parse_qnn, &mut out),
                _ if self.catalogue.is_recognised(column) => {
                    let field = self.assembler.assemble(column, raw);
                    field.write_into(&mut out, |key| {
                        self.catalogue
                            .friendly_name(column, key)
                            .unwrap_or_else(|| key.internal(column))
                    });
                }
                _ => self.keep_unknown(column, raw, &mut out, &mut fallback),
            }
        }

        let metrics = row_metrics(&out, fallback);
        write_metrics(&mut out, metrics);
        out
    }

    /// Decode rows lazily, preserving input order
    pub fn decode_rows<'a, I, K, V>(&'a self, rows: I) -> impl Iterator<Item = CleanRow> + 'a
    where
        I: IntoIterator<Item = BTreeMap<K, V>>,
        I::IntoIter: 'a,
        K: Borrow<str> + Ord + 'a,
        V: AsRef<str> + 'a,
    {
        rows.into_iter().map(move |row| self.decode_row(&row))
    }

    fn decode_control<K, V>(&self, row: &BTreeMap<K, V>, out: &mut CleanRow)
    where
        K: Borrow<str> + Ord,
        V: AsRef<str>,
    {
        let raw_date = row.get(columns::DATE).map(|v| v.as_ref().trim());
        let raw_time = row.get(columns::TIME).map(|v| v.as_ref().trim());

        // Global Hourly files carry DATE as an ISO stamp and no TIME column
        let split = raw_date.and_then(control::split_iso_timestamp);
        let (date, time) = match &split {
            Some((date, time)) => (Some(date.as_str()), raw_time.or(Some(time.as_str()))),
            None => (raw_date, raw_time),
        };

        for column in columns::ALL {
            let raw = match *column {
                columns::DATE => date,
                columns::TIME => time,
                other => row.get(other).map(|v| v.as_ref()),
            };
            if let Some(raw) = raw {
                out.insert(*column, normalise_control(column, raw));
            }
        }

        if let (Some(date), Some(time)) = (date, time) {
            let stamp = control::timestamp(date, time).unwrap_or(Value::Null);
            out.insert(TIMESTAMP_COLUMN, stamp);
        }
    }

    fn decode_free_text(
        &self,
        column: &str,
        raw: &str,
        grammar: fn(&str) -> CleanRow,
        out: &mut CleanRow,
    ) {
        if self.keep_remarks && !raw.trim().is_empty() {
            out.extend(grammar(raw));
        }
        if !self.drop_raw_columns {
            out.insert(column, raw_cell(raw));
        }
    }

    fn keep_unknown(
        &self,
        column: &str,
        raw: &str,
        out: &mut CleanRow,
        fallback: &mut FallbackCounts,
    ) {
        if self.strictness().is_strict() {
            warn!(
                identifier = column,
                reason = QcReason::UnknownIdentifier.as_str(),
                "{STRICT_LOG_PREFIX} unknown identifier"
            );
        }
        let token = raw.trim();
        if !token.is_empty() {
            fallback.considered += 1;
            if parse_numeric(token).is_some() {
                fallback.usable += 1;
            }
        }
        if !self.drop_raw_columns {
            out.insert(column, raw_cell(raw));
        }
    }
}

/// Raw cells that are neither field parts nor control columns
#[derive(Debug, Default, Clone, Copy)]
struct FallbackCounts {
    usable: usize,
    considered: usize,
}

fn raw_cell(raw: &str) -> Value {
    let token = raw.trim();
    if token.is_empty() {
        Value::Null
    } else {
        Value::text(token)
    }
}

/// Usability metrics from the row's `__qc_pass` flags.
///
/// Rows without any QC triplet fall back to the numeric cells among the
/// unrecognised columns.
fn row_metrics(row: &CleanRow, fallback: FallbackCounts) -> RowMetrics {
    let mut usable = 0;
    let mut considered = 0;
    for (column, value) in row.iter() {
        if column.ends_with(SUFFIX_QC_PASS) {
            considered += 1;
            if value.as_bool() == Some(true) {
                usable += 1;
            }
        }
    }
    if considered == 0 {
        return RowMetrics::from_counts(fallback.usable, fallback.considered);
    }
    RowMetrics::from_counts(usable, considered)
}

fn write_metrics(row: &mut CleanRow, metrics: RowMetrics) {
    row.insert(
        USABLE_METRIC_COUNT,
        Value::Number(metrics.usable_metric_count as f64),
    );
    row.insert(
        USABLE_METRIC_FRACTION,
        Value::Number(metrics.usable_metric_fraction),
    );
    row.insert(
        ROW_HAS_ANY_USABLE_METRIC,
        Value::Bool(metrics.row_has_any_usable_metric),
    );
}
