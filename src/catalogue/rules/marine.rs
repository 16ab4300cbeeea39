//! Marine, soil and ice sections: SA, ST, UA, UG, WA, WD, WG.

use super::{digits, pairs, quality};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::ADDITIONAL;

fn code(width: usize, codes: &[String], name: &str) -> PartRule {
    let sentinel = "9".repeat(width);
    PartRule::categorical(width, codes)
        .missing(&[sentinel.as_str()])
        .named(name)
}

fn wave_height(quality_part: Option<usize>, name: &str) -> PartRule {
    let rule = PartRule::numeric(3)
        .range(0.0, 500.0)
        .scale(0.1)
        .missing(&["999"])
        .agg(AggHint::Max)
        .named(name);
    match quality_part {
        Some(part) => rule.governed_by(part, ADDITIONAL),
        None => rule,
    }
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    b.family("SA", 1, 1);
    b.exact(FieldRule::new("SA1", "Sea surface temperature").value_quality(
        PartRule::numeric(4)
            .range(-50.0, 450.0)
            .scale(0.1)
            .missing(&["+999"])
            .named("sea_surface_temp_c"),
        ADDITIONAL,
        "sea_surface_temp_quality_code",
    ));

    b.family("ST", 1, 1);
    b.exact(
        FieldRule::new("ST1", "Soil temperature")
            .part(code(1, &digits(1, 2), "soil_temp_type_code"))
            .part(
                PartRule::numeric(5)
                    .range(-1100.0, 630.0)
                    .scale(0.1)
                    .missing(&["+9999"])
                    .governed_by(3, ADDITIONAL)
                    .named("soil_temp_c"),
            )
            .part(quality(ADDITIONAL, "soil_temp_quality_code"))
            .part(
                PartRule::numeric(4)
                    .range(0.0, 9998.0)
                    .scale(0.1)
                    .missing(&["9999"])
                    .governed_by(5, ADDITIONAL)
                    .agg(AggHint::Mode)
                    .named("soil_temp_depth_cm"),
            )
            .part(quality(ADDITIONAL, "soil_temp_depth_quality_code"))
            .part(code(2, &pairs(1, 14), "soil_cover_code").governed_by(7, ADDITIONAL))
            .part(quality(ADDITIONAL, "soil_cover_quality_code"))
            .part(code(1, &digits(1, 4), "soil_subplot_code").governed_by(9, ADDITIONAL))
            .part(quality(ADDITIONAL, "soil_subplot_quality_code")),
    );

    b.family("UA", 1, 1);
    b.exact(
        FieldRule::new("UA1", "Wave measurement")
            .part(
                PartRule::categorical(1, &["I", "M"])
                    .missing(&["9"])
                    .named("wave_method_code"),
            )
            .part(
                PartRule::numeric(2)
                    .range(0.0, 30.0)
                    .missing(&["99"])
                    .named("wave_period_s"),
            )
            .part(wave_height(Some(4), "wave_height_m"))
            .part(quality(ADDITIONAL, "wave_height_quality_code"))
            .part(code(2, &pairs(0, 9), "sea_state_code").governed_by(6, ADDITIONAL))
            .part(quality(ADDITIONAL, "sea_state_quality_code")),
    );

    b.family("UG", 1, 2);
    b.template(
        FieldRule::new("UG", "Wave measurement primary/secondary swell")
            .part(
                PartRule::numeric(2)
                    .range(0.0, 14.0)
                    .missing(&["99"])
                    .governed_by(4, ADDITIONAL)
                    .named("swell_{n}_period_s"),
            )
            .part(wave_height(Some(4), "swell_{n}_height_m"))
            .part(
                PartRule::numeric(3)
                    .range(1.0, 360.0)
                    .missing(&["999"])
                    .governed_by(4, ADDITIONAL)
                    .agg(AggHint::CircularMean)
                    .named("swell_{n}_direction_deg"),
            )
            .part(quality(ADDITIONAL, "swell_{n}_quality_code")),
    );

    b.family("WA", 1, 1);
    b.exact(
        FieldRule::new("WA1", "Platform ice accretion")
            .part(code(1, &digits(1, 5), "ice_accretion_source_code"))
            .part(
                PartRule::numeric(3)
                    .range(0.0, 998.0)
                    .missing(&["999"])
                    .governed_by(3, ADDITIONAL)
                    .agg(AggHint::Max)
                    .named("ice_accretion_thickness_cm"),
            )
            .part(quality(ADDITIONAL, "ice_accretion_quality_code")),
    );

    b.family("WD", 1, 1);
    b.exact(
        FieldRule::new("WD1", "Water surface ice observation")
            .part(code(2, &pairs(0, 36), "ice_edge_bearing_code"))
            .part(
                PartRule::numeric(3)
                    .range(0.0, 100.0)
                    .missing(&["999"])
                    .named("ice_concentration_percent"),
            )
            .part(code(2, &pairs(0, 5), "ice_non_uniform_code"))
            .part(code(1, &digits(0, 8), "ice_ship_position_code"))
            .part(code(1, &digits(1, 3), "ice_ship_penetrability_code"))
            .part(code(1, &digits(0, 8), "ice_trend_code"))
            .part(code(2, &pairs(0, 9), "ice_development_code"))
            .part(code(1, &digits(0, 1), "growler_bergy_bit_presence_code"))
            .part(
                PartRule::numeric(3)
                    .range(0.0, 998.0)
                    .missing(&["999"])
                    .agg(AggHint::Max)
                    .named("growler_bergy_bit_count"),
            )
            .part(
                PartRule::numeric(3)
                    .range(0.0, 998.0)
                    .missing(&["999"])
                    .agg(AggHint::Max)
                    .named("iceberg_count"),
            )
            .part(quality(ADDITIONAL, "water_surface_ice_quality_code")),
    );

    b.family("WG", 1, 1);
    b.exact(
        FieldRule::new("WG1", "Water surface ice historical observation")
            .part(code(2, &pairs(0, 36), "historical_ice_edge_bearing_code"))
            .part(
                PartRule::numeric(2)
                    .range(0.0, 98.0)
                    .missing(&["99"])
                    .agg(AggHint::Min)
                    .named("historical_ice_edge_distance_km"),
            )
            .part(code(2, &pairs(0, 8), "historical_ice_orientation_code"))
            .part(code(2, &pairs(0, 9), "historical_ice_formation_code"))
            .part(code(2, &pairs(0, 9), "historical_ice_navigation_code"))
            .part(quality(ADDITIONAL, "historical_ice_quality_code")),
    );
}
