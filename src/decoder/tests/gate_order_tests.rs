//! Tests for the order in which part gates fire

use super::{assembler, standard_catalogue};
use crate::catalogue::{FieldRule, PartRule};
use crate::config::Strictness;
use crate::constants::quality_codes::MANDATORY;
use crate::decoder::validate_part;
use crate::models::{QcReason, QcStatus, Value};

fn speed_rule() -> PartRule {
    PartRule::numeric(4)
        .range(0.0, 900.0)
        .scale(0.1)
        .missing(&["9999"])
        .governed_by(2, MANDATORY)
}

#[test]
fn test_width_gate_suppresses_every_other_reason_in_strict_mode() {
    let rule = speed_rule();

    // Wrong width with a bad quality code
    let strict = validate_part(&rule, "99999", Some("8"), Strictness::Strict);
    assert_eq!(strict.reason(), Some(QcReason::MalformedToken));
    assert_eq!(strict.value, Value::Null);

    let permissive = validate_part(&rule, "99999", Some("8"), Strictness::Permissive);
    assert_eq!(permissive.reason(), Some(QcReason::BadQualityCode));
}

#[test]
fn test_permissive_falls_through_to_the_failing_semantic_gate() {
    let rule = speed_rule();

    let short = validate_part(&rule, "050", Some("1"), Strictness::Permissive);
    assert_eq!(short.reason(), None);
    assert_eq!(short.value, Value::Number(5.0));

    let strict_short = validate_part(&rule, "050", Some("1"), Strictness::Strict);
    assert_eq!(strict_short.reason(), Some(QcReason::MalformedToken));

    let long_value = validate_part(&rule, "01000", Some("1"), Strictness::Permissive);
    assert_eq!(long_value.reason(), Some(QcReason::OutOfRange));

    let padded = validate_part(&rule, "00050", Some("1"), Strictness::Permissive);
    assert_eq!(padded.value, Value::Number(5.0));
    assert!(padded.signal.pass);
}

#[test]
fn test_quality_gate_runs_before_sentinel() {
    let outcome = validate_part(&speed_rule(), "9999", Some("8"), Strictness::Strict);
    assert_eq!(outcome.reason(), Some(QcReason::BadQualityCode));
    assert_eq!(outcome.signal.status, QcStatus::Invalid);
}

#[test]
fn test_sentinel_never_reports_out_of_range() {
    // 9999 lies outside 0..=900 but is the declared sentinel
    let outcome = validate_part(&speed_rule(), "9999", Some("1"), Strictness::Strict);
    assert_eq!(outcome.signal.status, QcStatus::Missing);
    assert_eq!(outcome.reason(), Some(QcReason::SentinelMissing));
    assert_eq!(outcome.value, Value::Null);
}

#[test]
fn test_range_checked_on_raw_value_before_scaling() {
    let rule = speed_rule();
    let edge = validate_part(&rule, "0900", Some("1"), Strictness::Strict);
    assert_eq!(edge.value, Value::Number(90.0));

    let beyond = validate_part(&rule, "0901", Some("1"), Strictness::Strict);
    assert_eq!(beyond.reason(), Some(QcReason::OutOfRange));
}

#[test]
fn test_malformed_numeric_in_both_modes() {
    let rule = speed_rule();
    for strictness in [Strictness::Strict, Strictness::Permissive] {
        let outcome = validate_part(&rule, "12X4", Some("1"), strictness);
        assert_eq!(outcome.reason(), Some(QcReason::MalformedToken));
    }
}

#[test]
fn test_domain_gate_for_categorical_parts() {
    let rule = PartRule::categorical(1, &["N", "V"]).missing(&["9"]);

    let known = validate_part(&rule, "V", None, Strictness::Strict);
    assert_eq!(known.value, Value::text("V"));
    assert!(known.signal.pass);

    let unknown = validate_part(&rule, "X", None, Strictness::Strict);
    assert_eq!(unknown.reason(), Some(QcReason::BadDomain));

    let missing = validate_part(&rule, "9", None, Strictness::Strict);
    assert_eq!(missing.reason(), Some(QcReason::SentinelMissing));
}

#[test]
fn test_empty_token_is_missing() {
    let outcome = validate_part(&speed_rule(), "", Some("1"), Strictness::Permissive);
    assert_eq!(outcome.signal.status, QcStatus::Missing);

    // Strict mode sees the width violation first
    let strict = validate_part(&speed_rule(), "", Some("1"), Strictness::Strict);
    assert_eq!(strict.reason(), Some(QcReason::MalformedToken));
}

#[test]
fn test_saturating_clamp_passes() {
    let rule = PartRule::numeric(5)
        .range(0.0, 99998.0)
        .saturating(22000.0)
        .missing(&["99999"]);

    let high = validate_part(&rule, "30000", None, Strictness::Strict);
    assert_eq!(high.value, Value::Number(22000.0));
    assert!(high.signal.pass);

    let low = validate_part(&rule, "01500", None, Strictness::Strict);
    assert_eq!(low.value, Value::Number(1500.0));
}

#[test]
fn test_pass_iff_value_present() {
    let rule = speed_rule();
    let tokens = ["0000", "0100", "9999", "12a4", "", "+001", "0050", "99999", "-001"];
    let qualities = ["1", "8", "9", "M"];

    for strictness in [Strictness::Strict, Strictness::Permissive] {
        for token in tokens {
            for quality in qualities {
                let outcome = validate_part(&rule, token, Some(quality), strictness);
                assert_eq!(
                    outcome.signal.pass,
                    !outcome.value.is_null(),
                    "token {token:?} quality {quality:?} {strictness:?}"
                );
                assert_eq!(outcome.signal.pass, outcome.signal.reason.is_none());
            }
        }
    }
}

/// A payload with every token filled with `fill` at its declared width
fn filled_payload(rule: &FieldRule, fill: char) -> String {
    (0..rule.expected_part_count())
        .map(|i| {
            let width = rule.parts.get(i).and_then(|p| p.token_width).unwrap_or(1);
            std::iter::repeat_n(fill, width).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn test_pass_iff_value_present_for_every_identifier() {
    let catalogue = standard_catalogue();
    let identifiers = catalogue.identifiers();
    assert!(!identifiers.is_empty());

    for strictness in [Strictness::Strict, Strictness::Permissive] {
        let fields = assembler(strictness);
        for identifier in &identifiers {
            let rule = catalogue.lookup(identifier).unwrap();
            let mut payloads: Vec<String> = ['0', '1', '9', 'X']
                .into_iter()
                .map(|fill| filled_payload(rule, fill))
                .collect();
            payloads.push(vec![""; rule.expected_part_count()].join(","));
            payloads.push(vec!["1"; rule.expected_part_count() + 1].join(","));

            for payload in &payloads {
                let output = fields.assemble(identifier, payload);
                for entry in &output.entries {
                    let Some(signal) = &entry.signal else {
                        continue;
                    };
                    assert_eq!(
                        signal.pass,
                        !entry.value.is_null(),
                        "{identifier} {payload:?} {:?} {strictness:?}",
                        entry.key
                    );
                    assert_eq!(signal.pass, signal.reason.is_none());
                }
            }
        }
    }
}
