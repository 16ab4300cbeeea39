//! Output schema for cleaned rows.
//!
//! Column types are taken from the rule catalogue so that every chunk of
//! every file produces the same dtype for the same column, whatever values
//! it happens to contain. Columns are ordered with the control columns first,
//! then the row metrics, then everything else alphabetically.

use crate::catalogue::{PartKey, PartKind, RuleCatalogue};
use crate::constants::{
    KEY_SEPARATOR, ROW_HAS_ANY_USABLE_METRIC, SUFFIX_QC_PASS, SUFFIX_QC_REASON,
    SUFFIX_QC_STATUS, USABLE_METRIC_COUNT, USABLE_METRIC_FRACTION, control,
};
use crate::decoder::control::TIMESTAMP_COLUMN;
use crate::error::Result;
use crate::models::{CleanRow, Value};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Maps cleaned-row columns to polars dtypes
#[derive(Debug, Clone, Copy)]
pub struct RowSchema<'c> {
    catalogue: &'c RuleCatalogue,
}

impl<'c> RowSchema<'c> {
    pub fn new(catalogue: &'c RuleCatalogue) -> Self {
        Self { catalogue }
    }

    /// Output dtype of a column
    pub fn dtype(&self, column: &str) -> DataType {
        if column.ends_with(SUFFIX_QC_PASS) {
            return DataType::Boolean;
        }
        if column.ends_with(SUFFIX_QC_STATUS) || column.ends_with(SUFFIX_QC_REASON) {
            return DataType::String;
        }
        match column {
            USABLE_METRIC_COUNT => DataType::UInt32,
            USABLE_METRIC_FRACTION => DataType::Float64,
            ROW_HAS_ANY_USABLE_METRIC => DataType::Boolean,
            control::LATITUDE | control::LONGITUDE | control::ELEVATION => DataType::Float64,
            _ => self.field_dtype(column).unwrap_or(DataType::String),
        }
    }

    /// Dtype of a friendly-named field column, from its part rule
    fn field_dtype(&self, column: &str) -> Option<DataType> {
        let internal = self.catalogue.internal_key(column)?;
        let (identifier, key) = internal.split_once(KEY_SEPARATOR)?;
        let rule = self.catalogue.lookup(identifier)?;
        let part = match PartKey::parse(key)? {
            PartKey::Value => rule.part_rule(1)?,
            PartKey::Part(index) => rule.part_rule(index)?,
            PartKey::Synthetic(_) => return Some(DataType::Boolean),
            PartKey::Quality | PartKey::Arity => return Some(DataType::String),
        };
        Some(match part.kind {
            PartKind::Numeric => DataType::Float64,
            _ => DataType::String,
        })
    }

    /// Every column appearing in `rows`, in output order
    pub fn column_order(&self, rows: &[CleanRow]) -> Vec<String> {
        let present: BTreeSet<&str> = rows.iter().flat_map(CleanRow::columns).collect();

        let leading: Vec<&str> = control::ALL
            .iter()
            .copied()
            .chain([
                TIMESTAMP_COLUMN,
                ROW_HAS_ANY_USABLE_METRIC,
                USABLE_METRIC_COUNT,
                USABLE_METRIC_FRACTION,
            ])
            .filter(|column| present.contains(column))
            .collect();

        leading
            .iter()
            .copied()
            .chain(present.iter().copied().filter(|c| !leading.contains(c)))
            .map(str::to_string)
            .collect()
    }

    /// Build a typed DataFrame from decoded rows
    pub fn to_dataframe(&self, rows: &[CleanRow]) -> Result<DataFrame> {
        if rows.is_empty() {
            return Ok(DataFrame::empty());
        }
        let columns: Vec<Column> = self
            .column_order(rows)
            .iter()
            .map(|name| build_column(name, &self.dtype(name), rows))
            .collect();
        debug!(
            "Built frame with {} rows and {} columns",
            rows.len(),
            columns.len()
        );
        Ok(DataFrame::new(columns)?)
    }
}

fn build_column(name: &str, dtype: &DataType, rows: &[CleanRow]) -> Column {
    let cells = rows.iter().map(|row| row.get(name).unwrap_or(&Value::Null));
    let series = match dtype {
        DataType::Boolean => {
            let values: Vec<Option<bool>> = cells.map(Value::as_bool).collect();
            Series::new(name.into(), values)
        }
        DataType::Float64 => {
            let values: Vec<Option<f64>> = cells.map(Value::as_f64).collect();
            Series::new(name.into(), values)
        }
        DataType::UInt32 => {
            let values: Vec<Option<u32>> = cells
                .map(|cell| cell.as_f64().map(|n| n as u32))
                .collect();
            Series::new(name.into(), values)
        }
        _ => {
            let values: Vec<Option<String>> = cells
                .map(|cell| match cell {
                    Value::Null => None,
                    Value::Text(text) => Some(text.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            Series::new(name.into(), values)
        }
    };
    series.into()
}
