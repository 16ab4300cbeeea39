//! Mandatory data section: wind, ceiling, visibility, temperature, dew point
//! and sea level pressure.

use super::{quality, variable_direction, wind_calm};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::{MANDATORY, TEMPERATURE};
use crate::constants::{CEILING_UNLIMITED_M, VISIBILITY_MAX_M};

pub(super) fn register(b: &mut CatalogueBuilder) {
    for code in ["WND", "CIG", "VIS", "TMP", "DEW", "SLP"] {
        b.bare(code);
    }

    b.exact(
        FieldRule::new("WND", "Wind observation")
            .part(
                PartRule::numeric(3)
                    .range(1.0, 360.0)
                    .missing(&["999"])
                    .governed_by(2, MANDATORY)
                    .agg(AggHint::CircularMean)
                    .named("wind_direction_deg"),
            )
            .part(quality(MANDATORY, "wind_direction_quality_code"))
            .part(
                PartRule::categorical(1, &["A", "B", "C", "H", "N", "R", "Q", "T", "V"])
                    .missing(&["9"])
                    .named("wind_type_code"),
            )
            .part(
                PartRule::numeric(4)
                    .range(0.0, 900.0)
                    .scale(0.1)
                    .missing(&["9999"])
                    .governed_by(5, MANDATORY)
                    .named("wind_speed_ms"),
            )
            .part(quality(MANDATORY, "wind_speed_quality_code"))
            .cross(wind_calm(3, 4))
            .cross(variable_direction(1, 3, "wind_direction_variable")),
    );

    b.exact(
        FieldRule::new("CIG", "Sky condition observation")
            .part(
                PartRule::numeric(5)
                    .range(0.0, 99998.0)
                    .saturating(CEILING_UNLIMITED_M)
                    .missing(&["99999"])
                    .governed_by(2, MANDATORY)
                    .agg(AggHint::Min)
                    .named("ceiling_height_m"),
            )
            .part(quality(MANDATORY, "ceiling_quality_code"))
            .part(
                PartRule::categorical(
                    1,
                    &["A", "B", "C", "D", "E", "M", "P", "R", "S", "U", "V", "W"],
                )
                .missing(&["9"])
                .named("ceiling_determination_code"),
            )
            .part(
                PartRule::categorical(1, &["N", "Y"])
                    .missing(&["9"])
                    .named("ceiling_cavok_code"),
            ),
    );

    b.exact(
        FieldRule::new("VIS", "Visibility observation")
            .part(
                PartRule::numeric(6)
                    .range(0.0, 999998.0)
                    .saturating(VISIBILITY_MAX_M)
                    .missing(&["999999"])
                    .governed_by(2, MANDATORY)
                    .agg(AggHint::Min)
                    .named("visibility_m"),
            )
            .part(quality(MANDATORY, "visibility_quality_code"))
            .part(
                PartRule::categorical(1, &["N", "V"])
                    .missing(&["9"])
                    .governed_by(4, MANDATORY)
                    .named("visibility_variability_code"),
            )
            .part(quality(MANDATORY, "visibility_variability_quality_code")),
    );

    b.exact(FieldRule::new("TMP", "Air temperature").value_quality(
        PartRule::numeric(5)
            .range(-932.0, 618.0)
            .scale(0.1)
            .missing(&["+9999"])
            .named("temperature_c"),
        TEMPERATURE,
        "temperature_quality_code",
    ));

    b.exact(FieldRule::new("DEW", "Dew point temperature").value_quality(
        PartRule::numeric(5)
            .range(-982.0, 368.0)
            .scale(0.1)
            .missing(&["+9999"])
            .named("dew_point_c"),
        TEMPERATURE,
        "dew_point_quality_code",
    ));

    // No declared sentinel: the all-nines heuristic covers both the 5-digit
    // form and short 4-digit corruptions.
    b.exact(FieldRule::new("SLP", "Sea level pressure").value_quality(
        PartRule::numeric(5)
            .range(8600.0, 10900.0)
            .scale(0.1)
            .named("sea_level_pressure_hpa"),
        MANDATORY,
        "sea_level_pressure_quality_code",
    ));
}
