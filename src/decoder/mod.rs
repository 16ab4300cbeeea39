//! Field decoder and quality engine
//!
//! Decoding runs per row, per field, per part:
//!
//! - [`splitter`] turns a raw cell into ordered, trimmed parts
//! - [`part`] runs the semantic gates on a single token
//! - [`field`] applies the arity gate and the cross-part rules of one field
//! - [`row`] drives a whole observation row and computes usability metrics
//!
//! [`control`] and [`remarks`] handle the metadata columns, and [`eqd`]
//! validates element quality data parameter codes.

pub mod control;
pub mod eqd;
pub mod field;
pub mod part;
pub mod remarks;
pub mod row;
pub mod splitter;

#[cfg(test)]
pub mod tests;

pub use field::{FieldAssembler, FieldOutput, PartEntry};
pub use part::{PartOutcome, validate_part};
pub use row::{RawRow, RowDecoder};
pub use splitter::{Payload, split_payload};

use crate::catalogue::RuleCatalogue;
use crate::config::Strictness;
use crate::error::Result;
use crate::models::CleanRow;
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Decode one row against the process-wide standard catalogue
pub fn decode_row<K, V>(row: &BTreeMap<K, V>, strictness: Strictness) -> Result<CleanRow>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    let catalogue = RuleCatalogue::global()?;
    Ok(RowDecoder::new(catalogue, strictness).decode_row(row))
}

/// Decode a batch of rows in order against the standard catalogue
pub fn decode_rows<I, K, V>(rows: I, strictness: Strictness) -> Result<Vec<CleanRow>>
where
    I: IntoIterator<Item = BTreeMap<K, V>>,
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    let decoder = RowDecoder::new(RuleCatalogue::global()?, strictness);
    Ok(rows.into_iter().map(|row| decoder.decode_row(&row)).collect())
}
