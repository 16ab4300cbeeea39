//! Tests for the field assembler: arity, shorthand and cross-part rules

use super::assembler;
use crate::catalogue::PartKey;
use crate::config::Strictness;
use crate::models::{QcReason, QcStatus, Value};

// =============================================================================
// Arity
// =============================================================================

#[test]
fn test_arity_violation_emits_single_entry() {
    let output = assembler(Strictness::Strict).assemble("WND", "180,1,N,0050");

    assert_eq!(output.entries.len(), 1);
    assert_eq!(output.entries[0].key, PartKey::Arity);
    let signal = output.signal(&PartKey::Arity).unwrap();
    assert_eq!(signal.status, QcStatus::Invalid);
    assert_eq!(signal.reason, Some(QcReason::BadArity));
}

#[test]
fn test_arity_applies_in_permissive_mode() {
    let output = assembler(Strictness::Permissive).assemble("WND", "180,1,N,0050,1,X");
    assert_eq!(output.entries.len(), 1);
    assert_eq!(output.entries[0].key, PartKey::Arity);
}

#[test]
fn test_shorthand_with_extra_part_is_an_arity_failure() {
    let output = assembler(Strictness::Strict).assemble("TMP", "+0250,1,X");
    assert_eq!(output.entries.len(), 1);
    assert_eq!(output.entries[0].key, PartKey::Arity);
}

#[test]
fn test_internal_row_for_arity_has_only_the_triplet() {
    let row = assembler(Strictness::Strict)
        .assemble("WND", "180,1")
        .to_internal_row();
    assert_eq!(row.len(), 3);
    assert!(!row.contains("WND__arity"));
    assert_eq!(
        row.get("WND__arity__qc_reason"),
        Some(&Value::text("BAD_ARITY"))
    );
}

#[test]
fn test_empty_and_unknown_fields_emit_nothing() {
    let assembler = assembler(Strictness::Strict);
    assert!(assembler.assemble("WND", "  ").is_empty());
    assert!(assembler.assemble("ZZ9", "1,2,3").is_empty());
    assert!(assembler.assemble("AA5", "01,0010,1,1").is_empty());
}

// =============================================================================
// Value/quality shorthand
// =============================================================================

#[test]
fn test_shorthand_emits_value_and_quality() {
    let output = assembler(Strictness::Strict).assemble("TMP", "+0250,1");

    assert_eq!(output.value(&PartKey::Value), Some(&Value::Number(25.0)));
    assert_eq!(output.value(&PartKey::Quality), Some(&Value::text("1")));
    assert!(output.signal(&PartKey::Value).unwrap().pass);
    assert!(output.signal(&PartKey::Quality).is_none());

    let row = output.to_internal_row();
    assert!(row.contains("TMP__value__qc_pass"));
    assert!(!row.contains("TMP__quality__qc_pass"));
}

#[test]
fn test_shorthand_bad_quality_nulls_both_columns() {
    let output = assembler(Strictness::Strict).assemble("TMP", "+0250,X");
    assert_eq!(output.value(&PartKey::Value), Some(&Value::Null));
    assert_eq!(output.value(&PartKey::Quality), Some(&Value::Null));
    assert_eq!(
        output.signal(&PartKey::Value).unwrap().reason,
        Some(QcReason::BadQualityCode)
    );
}

// =============================================================================
// Quality isolation
// =============================================================================

#[test]
fn test_bad_quality_only_affects_governed_part() {
    let output = assembler(Strictness::Strict).assemble("MA1", "10132,1,09876,8");

    assert_eq!(output.value(&PartKey::Part(1)), Some(&Value::Number(1013.2)));
    assert!(output.signal(&PartKey::Part(1)).unwrap().pass);
    assert_eq!(output.value(&PartKey::Part(3)), Some(&Value::Null));
    assert_eq!(
        output.signal(&PartKey::Part(3)).unwrap().reason,
        Some(QcReason::BadQualityCode)
    );
    // Quality parts carry no triplet
    assert!(output.signal(&PartKey::Part(2)).is_none());
    assert_eq!(output.signal_count(), 2);
}

// =============================================================================
// Wind rules
// =============================================================================

#[test]
fn test_wind_calm_overrides_type_code() {
    let output = assembler(Strictness::Strict).assemble("WND", "999,9,9,0000,1");

    assert_eq!(output.value(&PartKey::Part(3)), Some(&Value::text("C")));
    assert!(output.signal(&PartKey::Part(3)).unwrap().pass);
    assert_eq!(output.value(&PartKey::Part(4)), Some(&Value::Number(0.0)));
    assert!(output.signal(&PartKey::Part(4)).unwrap().pass);
    assert_eq!(
        output.signal(&PartKey::Part(1)).unwrap().status,
        QcStatus::Missing
    );
}

#[test]
fn test_type_nine_with_wind_is_missing() {
    let output = assembler(Strictness::Strict).assemble("WND", "180,1,9,0050,1");
    assert_eq!(output.value(&PartKey::Part(3)), Some(&Value::Null));
    assert_eq!(
        output.signal(&PartKey::Part(3)).unwrap().reason,
        Some(QcReason::SentinelMissing)
    );
}

#[test]
fn test_variable_direction_flag() {
    let output = assembler(Strictness::Strict).assemble("WND", "999,1,V,0050,1");

    assert_eq!(output.value(&PartKey::Part(1)), Some(&Value::Null));
    assert_eq!(
        output.signal(&PartKey::Part(1)).unwrap().status,
        QcStatus::Missing
    );
    let flag = PartKey::Synthetic("direction_variable".to_string());
    assert_eq!(output.value(&flag), Some(&Value::Bool(true)));
    assert!(output.signal(&flag).is_none());
}

#[test]
fn test_variable_type_with_direction_adds_no_flag() {
    let output = assembler(Strictness::Strict).assemble("WND", "180,1,V,0050,1");
    let flag = PartKey::Synthetic("direction_variable".to_string());
    assert!(output.get(&flag).is_none());
    assert_eq!(output.value(&PartKey::Part(1)), Some(&Value::Number(180.0)));
}

#[test]
fn test_supplementary_wind_calm_flags() {
    let assembler = assembler(Strictness::Strict);
    let calm = PartKey::Synthetic("calm".to_string());

    let od = assembler.assemble("OD1", "1,24,0000,1,999");
    assert_eq!(od.value(&calm), Some(&Value::Bool(true)));

    let od_windy = assembler.assemble("OD1", "1,24,0050,1,999");
    assert!(od_windy.get(&calm).is_none());

    let oe = assembler.assemble("OE2", "1,24,00000,999,1200,1");
    assert_eq!(oe.value(&calm), Some(&Value::Bool(true)));
}

// =============================================================================
// EQD parameter codes
// =============================================================================

#[test]
fn test_eqd_legacy_parameter() {
    let assembler = assembler(Strictness::Strict);

    let ok = assembler.assemble("Q01", "+00123,4,APC3");
    assert_eq!(ok.value(&PartKey::Part(3)), Some(&Value::text("APC3")));
    assert!(ok.signal(&PartKey::Part(3)).unwrap().pass);

    let msd = assembler.assemble("Q01", "+00123,4,A12345");
    assert_eq!(msd.value(&PartKey::Part(3)), Some(&Value::Null));
    assert_eq!(
        msd.signal(&PartKey::Part(3)).unwrap().reason,
        Some(QcReason::BadDomain)
    );
}

#[test]
fn test_eqd_msd_only_for_r_prefix() {
    let output = assembler(Strictness::Strict).assemble("R01", "+00123,4,A12345");
    assert!(output.signal(&PartKey::Part(3)).unwrap().pass);
}

#[test]
fn test_eqd_element_schema_for_n_prefix() {
    let assembler = assembler(Strictness::Strict);

    let ok = assembler.assemble("N07", "0001,0,PRCPBD");
    assert!(ok.signal(&PartKey::Part(3)).unwrap().pass);

    let legacy = assembler.assemble("N07", "0001,0,APC3");
    assert_eq!(
        legacy.signal(&PartKey::Part(3)).unwrap().reason,
        Some(QcReason::BadDomain)
    );
}
