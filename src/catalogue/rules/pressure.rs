//! Additional pressure sections: MA, MD..MK.

use super::{DDHHMM, digits, quality};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::{ADDITIONAL, PRESSURE};

/// Pressure in tenths of hectopascals with a `99999` sentinel
fn hpa(min: f64, max: f64, quality_part: usize, name: &str) -> PartRule {
    PartRule::numeric(5)
        .range(min, max)
        .scale(0.1)
        .missing(&["99999"])
        .governed_by(quality_part, PRESSURE)
        .named(name)
}

/// Station pressure followed by sea level pressure, each with its own quality
fn station_and_sea_level(
    b: &mut CatalogueBuilder,
    identifier: &str,
    description: &str,
    station_name: &str,
    sea_level_name: &str,
    sea_level_agg: AggHint,
) {
    b.family(&identifier[..2], 1, 1);
    b.exact(
        FieldRule::new(identifier, description)
            .part(hpa(4500.0, 10900.0, 2, station_name))
            .part(quality(PRESSURE, &format!("{station_name}_quality_code")))
            .part(hpa(8600.0, 10900.0, 4, sea_level_name).agg(sea_level_agg))
            .part(quality(PRESSURE, &format!("{sea_level_name}_quality_code"))),
    );
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    b.family("MA", 1, 1);
    b.exact(
        FieldRule::new("MA1", "Atmospheric pressure observation")
            .part(hpa(8635.0, 10904.0, 2, "altimeter_setting_hpa"))
            .part(quality(PRESSURE, "altimeter_setting_quality_code"))
            .part(hpa(4500.0, 10900.0, 4, "station_pressure_hpa"))
            .part(quality(PRESSURE, "station_pressure_quality_code")),
    );

    b.family("MD", 1, 1);
    b.exact(
        FieldRule::new("MD1", "Atmospheric pressure change")
            .part(
                PartRule::categorical(1, &digits(0, 8))
                    .missing(&["9"])
                    .governed_by(2, PRESSURE)
                    .named("pressure_tendency_code"),
            )
            .part(quality(PRESSURE, "pressure_tendency_quality_code"))
            .part(
                PartRule::numeric(3)
                    .range(0.0, 500.0)
                    .scale(0.1)
                    .missing(&["999"])
                    .governed_by(4, PRESSURE)
                    .named("pressure_change_3h_hpa"),
            )
            .part(quality(PRESSURE, "pressure_change_3h_quality_code"))
            .part(
                PartRule::numeric(4)
                    .range(-800.0, 800.0)
                    .scale(0.1)
                    .missing(&["+999"])
                    .governed_by(6, PRESSURE)
                    .named("pressure_change_24h_hpa"),
            )
            .part(quality(PRESSURE, "pressure_change_24h_quality_code")),
    );

    b.family("ME", 1, 1);
    b.exact(
        FieldRule::new("ME1", "Geopotential height isobaric level")
            .part(
                PartRule::categorical(1, &digits(1, 5))
                    .missing(&["9"])
                    .named("geopotential_level_code"),
            )
            .part(
                PartRule::numeric(4)
                    .range(0.0, 9998.0)
                    .missing(&["9999"])
                    .governed_by(3, ADDITIONAL)
                    .named("geopotential_height_m"),
            )
            .part(quality(ADDITIONAL, "geopotential_height_quality_code")),
    );

    station_and_sea_level(
        b,
        "MF1",
        "Atmospheric pressure observation (STP/SLP)",
        "station_pressure_day_mean_hpa",
        "sea_level_pressure_day_mean_hpa",
        AggHint::Mean,
    );
    station_and_sea_level(
        b,
        "MG1",
        "Atmospheric pressure observation (average station, minimum sea level)",
        "station_pressure_avg_hpa",
        "sea_level_pressure_min_hpa",
        AggHint::Min,
    );
    station_and_sea_level(
        b,
        "MH1",
        "Atmospheric pressure observation for the month",
        "station_pressure_month_mean_hpa",
        "sea_level_pressure_month_mean_hpa",
        AggHint::Mean,
    );

    b.family("MK", 1, 1);
    b.exact(
        FieldRule::new("MK1", "Atmospheric pressure extremes for the month")
            .part(hpa(8600.0, 10900.0, 3, "sea_level_pressure_month_max_hpa").agg(AggHint::Max))
            .part(
                PartRule::text(6)
                    .pattern(DDHHMM)
                    .missing(&["999999"])
                    .named("sea_level_pressure_month_max_ddhhmm"),
            )
            .part(quality(
                PRESSURE,
                "sea_level_pressure_month_max_quality_code",
            ))
            .part(hpa(8600.0, 10900.0, 6, "sea_level_pressure_month_min_hpa").agg(AggHint::Min))
            .part(
                PartRule::text(6)
                    .pattern(DDHHMM)
                    .missing(&["999999"])
                    .named("sea_level_pressure_month_min_ddhhmm"),
            )
            .part(quality(
                PRESSURE,
                "sea_level_pressure_month_min_quality_code",
            )),
    );
}
