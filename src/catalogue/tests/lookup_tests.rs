//! Tests for identifier recognition, cardinality and rule lookup

use super::standard_catalogue;
use crate::catalogue::{AggHint, CrossPartRule, EqdValidator, PartKind};

#[test]
fn test_declared_cardinalities() {
    let catalogue = standard_catalogue();

    let families = [
        ("AA", 4),
        ("KA", 4),
        ("OA", 3),
        ("RH", 3),
        ("GA", 6),
        ("GD", 6),
        ("AX", 6),
        ("AT", 8),
        ("AU", 9),
    ];
    for (family, max) in families {
        for n in 1..=max {
            let identifier = format!("{family}{n}");
            assert!(
                catalogue.is_recognised(&identifier),
                "{identifier} should be recognised"
            );
        }
        let beyond = format!("{family}{}", max + 1);
        assert!(
            !catalogue.is_recognised(&beyond),
            "{beyond} is outside the family cardinality"
        );
        assert!(!catalogue.is_recognised(&format!("{family}0")));
    }
}

#[test]
fn test_mandatory_identifiers_recognised() {
    let catalogue = standard_catalogue();
    for identifier in ["WND", "CIG", "VIS", "TMP", "DEW", "SLP"] {
        assert!(catalogue.is_recognised(identifier), "{identifier}");
    }
    assert!(!catalogue.is_recognised("WND1"));
    assert!(!catalogue.is_recognised("TMP2"));
}

#[test]
fn test_unknown_families_rejected() {
    let catalogue = standard_catalogue();
    for identifier in ["ZZ1", "XYZ", "", "A", "aa1", "STATION", "REM", "ADD"] {
        assert!(!catalogue.is_recognised(identifier), "{identifier}");
        assert!(catalogue.lookup(identifier).is_none());
        assert!(catalogue.expected_part_count(identifier).is_none());
    }
}

#[test]
fn test_eqd_identifiers() {
    let catalogue = standard_catalogue();
    for prefix in ["Q", "P", "R", "C", "D", "N"] {
        assert!(catalogue.is_recognised(&format!("{prefix}01")));
        assert!(catalogue.is_recognised(&format!("{prefix}99")));
        assert!(!catalogue.is_recognised(&format!("{prefix}00")));
        assert!(!catalogue.is_recognised(&format!("{prefix}1")));
        assert!(!catalogue.is_recognised(&format!("{prefix}100")));
    }

    let rule = catalogue.lookup("R42").unwrap();
    assert!(rule.is_eqd());
    assert_eq!(rule.expected_part_count(), 3);
    assert!(rule.cross_rules.contains(&CrossPartRule::EqdParameter {
        part: 3,
        validator: EqdValidator::LegacyOrMsd,
    }));

    let rule = catalogue.lookup("N07").unwrap();
    assert!(rule.cross_rules.contains(&CrossPartRule::EqdParameter {
        part: 3,
        validator: EqdValidator::ElementSchema,
    }));
}

#[test]
fn test_exact_entry_wins_over_template() {
    let catalogue = standard_catalogue();

    let co1 = catalogue.lookup("CO1").unwrap();
    assert_eq!(co1.identifier, "CO1");
    assert_eq!(co1.expected_part_count(), 2);

    let co4 = catalogue.lookup("CO4").unwrap();
    assert_eq!(co4.identifier, "CO");

    let ia1 = catalogue.lookup("IA1").unwrap();
    assert!(ia1.is_value_quality());
    let ia2 = catalogue.lookup("IA2").unwrap();
    assert!(!ia2.is_value_quality());
    assert_eq!(ia2.expected_part_count(), 3);
}

#[test]
fn test_expected_part_counts() {
    let catalogue = standard_catalogue();
    let expected = [
        ("WND", 5),
        ("CIG", 4),
        ("VIS", 4),
        ("TMP", 2),
        ("DEW", 2),
        ("SLP", 2),
        ("MA1", 4),
        ("AA1", 4),
        ("GA3", 6),
        ("GF1", 13),
        ("OB1", 13),
        ("KA2", 4),
        ("OD1", 5),
        ("OE2", 6),
        ("Q01", 3),
    ];
    for (identifier, count) in expected {
        assert_eq!(
            catalogue.expected_part_count(identifier),
            Some(count),
            "{identifier}"
        );
    }
}

#[test]
fn test_mandatory_part_rules() {
    let catalogue = standard_catalogue();

    let wnd = catalogue.lookup("WND").unwrap();
    let direction = wnd.part_rule(1).unwrap();
    assert_eq!(direction.kind, PartKind::Numeric);
    assert_eq!(direction.token_width, Some(3));
    assert_eq!(direction.quality_part, Some(2));
    assert_eq!(direction.agg_hint, AggHint::CircularMean);
    assert_eq!(wnd.part_rule(2).unwrap().kind, PartKind::Quality);

    let cig = catalogue.lookup("CIG").unwrap();
    let height = cig.part_rule(1).unwrap();
    assert_eq!(height.max_value, Some(99998.0));
    assert_eq!(height.saturating_max, Some(22000.0));

    let vis = catalogue.lookup("VIS").unwrap();
    assert_eq!(vis.part_rule(1).unwrap().saturating_max, Some(160000.0));

    let slp = catalogue.lookup("SLP").unwrap();
    assert!(slp.part_rule(1).unwrap().missing_values.is_empty());
}

#[test]
fn test_pressure_quality_alphabet_excludes_eight() {
    let catalogue = standard_catalogue();
    let ma1 = catalogue.lookup("MA1").unwrap();
    let station = ma1.part_rule(3).unwrap();
    assert_eq!(station.quality_part, Some(4));
    let alphabet = station.allowed_quality.as_ref().unwrap();
    assert!(alphabet.iter().any(|code| code == "1"));
    assert!(!alphabet.iter().any(|code| code == "8"));
}

#[test]
fn test_agg_hint_lookup() {
    let catalogue = standard_catalogue();
    assert_eq!(catalogue.agg_hint("WND", 1), Some(AggHint::CircularMean));
    assert_eq!(catalogue.agg_hint("AA2", 2), Some(AggHint::Sum));
    assert_eq!(catalogue.agg_hint("TMP", 1), Some(AggHint::Mean));
    assert_eq!(catalogue.agg_hint("TMP", 9), None);
    assert_eq!(catalogue.agg_hint("ZZ1", 1), None);
}

#[test]
fn test_quality_parts_reference_quality_kinds() {
    let catalogue = standard_catalogue();
    for identifier in catalogue.identifiers() {
        let rule = catalogue.lookup(&identifier).unwrap();
        if rule.is_value_quality() {
            continue;
        }
        for part in &rule.parts {
            if let Some(index) = part.quality_part {
                let governing = rule.part_rule(index).unwrap();
                assert_eq!(
                    governing.kind,
                    PartKind::Quality,
                    "{identifier} part {index} governs a value but is not a quality part"
                );
            }
        }
    }
}
