//! Tests for catalogue builder validation

use crate::catalogue::{FieldRule, PartRule, RuleCatalogue};
use crate::constants::quality_codes::MANDATORY;
use crate::error::IsdError;

fn tmp_rule(name: &str) -> FieldRule {
    FieldRule::new("TMP", "Air temperature").value_quality(
        PartRule::numeric(5).named(name),
        MANDATORY,
        "temperature_quality_code",
    )
}

#[test]
fn test_minimal_catalogue_builds() {
    let mut builder = RuleCatalogue::builder();
    builder.bare("TMP").exact(tmp_rule("temperature_c"));
    let catalogue = builder.build().unwrap();

    assert!(catalogue.is_recognised("TMP"));
    assert_eq!(catalogue.name_count(), 2);
    assert_eq!(catalogue.identifiers(), vec!["TMP".to_string()]);
}

#[test]
fn test_duplicate_friendly_name_rejected() {
    let mut builder = RuleCatalogue::builder();
    builder.bare("TMP").bare("DEW").exact(tmp_rule("temperature_c")).exact(
        FieldRule::new("DEW", "Dew point").value_quality(
            PartRule::numeric(5).named("temperature_c"),
            MANDATORY,
            "dew_point_quality_code",
        ),
    );

    let error = builder.build().unwrap_err();
    assert!(matches!(error, IsdError::CatalogueInvalid { .. }));
    assert!(error.to_string().contains("temperature_c"));
}

#[test]
fn test_reserved_names_rejected() {
    let mut builder = RuleCatalogue::builder();
    builder.bare("TMP").exact(tmp_rule("usable_metric_count"));
    assert!(builder.build().is_err());

    let mut builder = RuleCatalogue::builder();
    builder.bare("TMP").exact(tmp_rule("temp__c"));
    assert!(builder.build().is_err());
}

#[test]
fn test_exact_rule_outside_family_rejected() {
    let mut builder = RuleCatalogue::builder();
    builder.family("AA", 1, 4).exact(
        FieldRule::new("AA5", "Out of range")
            .part(PartRule::numeric(2).named("period"))
            .part(PartRule::quality(MANDATORY).named("period_quality")),
    );
    assert!(builder.build().is_err());
}

#[test]
fn test_invalid_quality_reference_rejected() {
    let mut builder = RuleCatalogue::builder();
    builder.bare("XYZ").exact(
        FieldRule::new("XYZ", "Self governed")
            .part(
                PartRule::numeric(2)
                    .governed_by(1, MANDATORY)
                    .named("self_value"),
            )
            .part(PartRule::quality(MANDATORY).named("self_quality")),
    );
    assert!(builder.build().is_err());
}

#[test]
fn test_missing_friendly_name_rejected() {
    let mut builder = RuleCatalogue::builder();
    builder
        .bare("XYZ")
        .exact(FieldRule::new("XYZ", "Unnamed").part(PartRule::numeric(2)));
    assert!(builder.build().is_err());
}

#[test]
fn test_invalid_pattern_rejected() {
    let mut builder = RuleCatalogue::builder();
    builder.bare("XYZ").exact(
        FieldRule::new("XYZ", "Bad regex").part(PartRule::text(2).pattern("[").named("bad")),
    );
    assert!(matches!(
        builder.build().unwrap_err(),
        IsdError::InvalidPattern(_)
    ));
}

#[test]
fn test_standard_catalogue_is_large() {
    let catalogue = RuleCatalogue::standard().unwrap();
    let identifiers = catalogue.identifiers();
    assert!(identifiers.len() > 800);
    assert!(identifiers.contains(&"GF1".to_string()));
    assert!(identifiers.contains(&"N99".to_string()));
}
