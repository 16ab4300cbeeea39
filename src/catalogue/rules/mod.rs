//! Declarative rule tables, one module per ISD section.
//!
//! Each module declares its families (with their legal suffix ranges) and the
//! field rules that cover them. Friendly-name templates use `{n}` for the
//! identifier suffix so that repeated families (`GA1..GA6`) get distinct
//! output columns.

mod cloud_solar;
mod crn;
mod eqd;
mod ground;
mod mandatory;
mod marine;
mod precipitation;
mod pressure;
mod temperature;
mod weather;
mod wind;

use super::{CatalogueBuilder, CrossPartRule, FieldRule, PartRule};
use crate::constants::quality_codes::{CRN_FLAG, CRN_QC};

/// Register every section's families and rules
pub(crate) fn register_all(builder: &mut CatalogueBuilder) {
    mandatory::register(builder);
    precipitation::register(builder);
    weather::register(builder);
    crn::register(builder);
    cloud_solar::register(builder);
    ground::register(builder);
    temperature::register(builder);
    pressure::register(builder);
    wind::register(builder);
    marine::register(builder);
    eqd::register(builder);
}

/// Precipitation and snow condition codes
const CONDITION_CODES: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "E", "I", "J"];

/// `DDHHMM` day-hour-minute stamp
const DDHHMM: &str = r"(0[1-9]|[12]\d|3[01])([01]\d|2[0-3])[0-5]\d";

/// `HHMM` time of day
const HHMM: &str = r"([01]\d|2[0-3])[0-5]\d";

/// `DDDD` pair of days of month
const DAY_PAIR: &str = r"(0[1-9]|[12]\d|3[01]){2}";

/// Three days of month packed into six characters
const DAY_TRIPLE: &str = r"(0[1-9]|[12]\d|3[01]){3}";

/// Single-digit codes `lo..=hi`
fn digits(lo: u32, hi: u32) -> Vec<String> {
    super::code_range(lo, hi, 1)
}

/// Two-digit codes `lo..=hi`
fn pairs(lo: u32, hi: u32) -> Vec<String> {
    super::code_range(lo, hi, 2)
}

fn quality(alphabet: &[&str], name: &str) -> PartRule {
    PartRule::quality(alphabet).named(name)
}

/// Condition code part with `9` as missing
fn condition(name: &str) -> PartRule {
    PartRule::categorical(1, CONDITION_CODES)
        .missing(&["9"])
        .named(name)
}

/// A measured value followed by its QC code and data flag, as reported by
/// the climate reference network and derived solar/surface sections.
/// `qc_part` is the absolute 1-based index the QC code will occupy.
fn with_qc_flag(
    value: PartRule,
    qc_part: usize,
    name: &str,
    qc_alphabet: &[&str],
    flag_alphabet: &[&str],
) -> [PartRule; 3] {
    [
        value.governed_by(qc_part, qc_alphabet).named(name),
        quality(qc_alphabet, &format!("{name}_qc")),
        quality(flag_alphabet, &format!("{name}_flag")),
    ]
}

/// Append a CRN-style measured triple at the next free part index
fn crn_measured(rule: FieldRule, value: PartRule, name: &str) -> FieldRule {
    let qc_part = rule.parts.len() + 2;
    rule.extend_parts(with_qc_flag(value, qc_part, name, CRN_QC, CRN_FLAG))
}

fn wind_calm(type_part: usize, speed_part: usize) -> CrossPartRule {
    CrossPartRule::WindCalm {
        type_part,
        speed_part,
        calm_type: "9".to_string(),
        replacement: "C".to_string(),
    }
}

fn variable_direction(direction_part: usize, type_part: usize, flag_name: &str) -> CrossPartRule {
    CrossPartRule::VariableDirection {
        direction_part,
        type_part,
        type_token: "V".to_string(),
        flag: "direction_variable".to_string(),
        flag_name: flag_name.to_string(),
    }
}

fn calm_flag(direction_part: usize, speed_part: usize, flag_name: &str) -> CrossPartRule {
    CrossPartRule::CalmFlag {
        direction_part,
        speed_part,
        flag: "calm".to_string(),
        flag_name: flag_name.to_string(),
    }
}
