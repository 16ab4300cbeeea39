//! Test utilities for decoder testing
//!
//! Provides shared decoders and raw-row builders used across the decoder
//! test modules.

use super::{FieldAssembler, RawRow, RowDecoder};
use crate::catalogue::RuleCatalogue;
use crate::config::Strictness;
use crate::models::CleanRow;

// Test modules
mod cross_rule_tests;
mod gate_order_tests;

/// Shared standard catalogue
pub fn standard_catalogue() -> &'static RuleCatalogue {
    RuleCatalogue::global().expect("standard catalogue must build")
}

/// Field assembler over the standard catalogue
pub fn assembler(strictness: Strictness) -> FieldAssembler<'static> {
    FieldAssembler::new(standard_catalogue(), strictness)
}

/// Row decoder over the standard catalogue
pub fn row_decoder(strictness: Strictness) -> RowDecoder<'static> {
    RowDecoder::new(standard_catalogue(), strictness)
}

/// Build a raw row from `(column, cell)` pairs
pub fn raw_row(cells: &[(&str, &str)]) -> RawRow {
    cells
        .iter()
        .map(|(column, cell)| (column.to_string(), cell.to_string()))
        .collect()
}

/// Decode `(column, cell)` pairs with the given strictness
pub fn decode(cells: &[(&str, &str)], strictness: Strictness) -> CleanRow {
    row_decoder(strictness).decode_row(&raw_row(cells))
}
