//! Supplementary wind and relative humidity: OA..OE, RH.

use super::{HHMM, calm_flag, crn_measured, digits, quality};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::ADDITIONAL;

fn direction(quality_part: Option<usize>, name: &str) -> PartRule {
    let rule = PartRule::numeric(3)
        .range(1.0, 360.0)
        .missing(&["999"])
        .agg(AggHint::CircularMean)
        .named(name);
    match quality_part {
        Some(part) => rule.governed_by(part, ADDITIONAL),
        None => rule,
    }
}

fn period_hours(width: usize, min: f64, max: f64, name: &str) -> PartRule {
    let sentinel = "9".repeat(width);
    PartRule::numeric(width)
        .range(min, max)
        .missing(&[sentinel.as_str()])
        .agg(AggHint::Mode)
        .named(name)
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    b.family("OA", 1, 3);
    b.template(
        FieldRule::new("OA", "Supplementary wind observation")
            .part(
                PartRule::categorical(1, &digits(1, 6))
                    .missing(&["9"])
                    .named("supp_wind_{n}_type_code"),
            )
            .part(period_hours(2, 1.0, 48.0, "supp_wind_{n}_period_hours"))
            .part(
                PartRule::numeric(4)
                    .range(0.0, 2000.0)
                    .scale(0.1)
                    .missing(&["9999"])
                    .governed_by(4, ADDITIONAL)
                    .named("supp_wind_{n}_speed_ms"),
            )
            .part(quality(ADDITIONAL, "supp_wind_{n}_quality_code")),
    );

    b.family("OB", 1, 2);
    let mut section = FieldRule::new("OB", "Hourly/sub-hourly wind section").part(period_hours(
        3,
        1.0,
        998.0,
        "wind_section_{n}_period_minutes",
    ));
    section = crn_measured(
        section,
        PartRule::numeric(4)
            .range(0.0, 9998.0)
            .scale(0.1)
            .missing(&["9999"])
            .agg(AggHint::Max),
        "wind_section_{n}_max_gust_ms",
    );
    section = crn_measured(
        section,
        PartRule::numeric(3)
            .range(1.0, 360.0)
            .missing(&["999"])
            .agg(AggHint::CircularMean),
        "wind_section_{n}_max_gust_direction_deg",
    );
    for stat in ["speed_std_ms", "direction_std_deg"] {
        section = crn_measured(
            section,
            PartRule::numeric(5)
                .range(0.0, 99998.0)
                .scale(0.01)
                .missing(&["99999"]),
            &format!("wind_section_{{n}}_{stat}"),
        );
    }
    b.template(section);

    b.family("OC", 1, 1);
    b.exact(FieldRule::new("OC1", "Wind gust observation").value_quality(
        PartRule::numeric(4)
            .range(0.0, 1100.0)
            .scale(0.1)
            .missing(&["9999"])
            .agg(AggHint::Max)
            .named("wind_gust_ms"),
        ADDITIONAL,
        "wind_gust_quality_code",
    ));

    b.family("OD", 1, 3);
    b.template(
        FieldRule::new("OD", "Supplementary wind observation with direction")
            .part(
                PartRule::categorical(1, &digits(1, 5))
                    .missing(&["9"])
                    .named("supp_wind_dir_{n}_type_code"),
            )
            .part(period_hours(2, 1.0, 48.0, "supp_wind_dir_{n}_period_hours"))
            .part(
                PartRule::numeric(4)
                    .range(0.0, 2000.0)
                    .scale(0.1)
                    .missing(&["9999"])
                    .governed_by(4, ADDITIONAL)
                    .named("supp_wind_dir_{n}_speed_ms"),
            )
            .part(quality(ADDITIONAL, "supp_wind_dir_{n}_quality_code"))
            .part(direction(None, "supp_wind_dir_{n}_direction_deg"))
            .cross(calm_flag(5, 3, "supp_wind_dir_{n}_calm")),
    );

    b.family("OE", 1, 3);
    b.template(
        FieldRule::new("OE", "Summary of day wind observation")
            .part(
                PartRule::categorical(1, &digits(1, 2))
                    .missing(&["9"])
                    .named("day_wind_{n}_type_code"),
            )
            .part(period_hours(2, 24.0, 24.0, "day_wind_{n}_period_hours"))
            .part(
                PartRule::numeric(5)
                    .range(0.0, 20000.0)
                    .scale(0.01)
                    .missing(&["99999"])
                    .governed_by(6, ADDITIONAL)
                    .agg(AggHint::Max)
                    .named("day_wind_{n}_speed_ms"),
            )
            .part(direction(Some(6), "day_wind_{n}_direction_deg"))
            .part(
                PartRule::text(4)
                    .pattern(HHMM)
                    .missing(&["9999"])
                    .named("day_wind_{n}_time_hhmm"),
            )
            .part(quality(ADDITIONAL, "day_wind_{n}_quality_code"))
            .cross(calm_flag(4, 3, "day_wind_{n}_calm")),
    );

    b.family("RH", 1, 3);
    b.template(
        FieldRule::new("RH", "Relative humidity")
            .part(period_hours(3, 1.0, 744.0, "relative_humidity_{n}_period_hours"))
            .part(
                PartRule::categorical(1, &["M", "N", "X"])
                    .missing(&["9"])
                    .named("relative_humidity_{n}_code"),
            )
            .part(
                PartRule::numeric(3)
                    .range(0.0, 100.0)
                    .missing(&["999"])
                    .governed_by(5, ADDITIONAL)
                    .named("relative_humidity_{n}_percent"),
            )
            .part(
                PartRule::categorical(1, &["D"])
                    .missing(&["9"])
                    .named("relative_humidity_{n}_derived_code"),
            )
            .part(quality(ADDITIONAL, "relative_humidity_{n}_quality_code")),
    );
}
