//! Hail, ground surface and pan evaporation: HL, IA, IB, IC.

use super::{condition, crn_measured, pairs, quality};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::ADDITIONAL;

fn surface_temp() -> PartRule {
    PartRule::numeric(5)
        .range(-9999.0, 9998.0)
        .scale(0.1)
        .missing(&["+9999"])
}

fn surface_std() -> PartRule {
    PartRule::numeric(4)
        .range(0.0, 9998.0)
        .scale(0.1)
        .missing(&["9999"])
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    b.family("HL", 1, 1);
    b.exact(FieldRule::new("HL1", "Hail data").value_quality(
        PartRule::numeric(3)
            .range(0.0, 200.0)
            .scale(0.1)
            .missing(&["999"])
            .agg(AggHint::Max)
            .named("hail_size_cm"),
        ADDITIONAL,
        "hail_size_quality_code",
    ));

    b.family("IA", 1, 2);
    b.exact(FieldRule::new("IA1", "Ground surface observation").value_quality(
        PartRule::categorical(2, &pairs(0, 31))
            .missing(&["99"])
            .named("ground_surface_code"),
        ADDITIONAL,
        "ground_surface_quality_code",
    ));
    b.exact(
        FieldRule::new("IA2", "Ground surface minimum temperature")
            .part(
                PartRule::numeric(3)
                    .range(1.0, 480.0)
                    .scale(0.1)
                    .missing(&["999"])
                    .agg(AggHint::Mode)
                    .named("ground_min_temp_period_hours"),
            )
            .part(
                PartRule::numeric(5)
                    .range(-1100.0, 1500.0)
                    .scale(0.1)
                    .missing(&["+9999"])
                    .governed_by(3, ADDITIONAL)
                    .agg(AggHint::Min)
                    .named("ground_min_temp_c"),
            )
            .part(quality(ADDITIONAL, "ground_min_temp_quality_code")),
    );

    b.family("IB", 1, 2);
    let mut surface = FieldRule::new("IB1", "Hourly surface temperature");
    surface = crn_measured(surface, surface_temp(), "surface_temp_avg_c");
    surface = crn_measured(surface, surface_temp().agg(AggHint::Min), "surface_temp_min_c");
    surface = crn_measured(surface, surface_temp().agg(AggHint::Max), "surface_temp_max_c");
    surface = crn_measured(surface, surface_std(), "surface_temp_std_c");
    b.exact(surface);

    let sensor = crn_measured(
        FieldRule::new("IB2", "Hourly surface temperature sensor"),
        surface_temp(),
        "surface_sensor_temp_avg_c",
    );
    b.exact(crn_measured(sensor, surface_std(), "surface_sensor_temp_std_c"));

    b.family("IC", 1, 1);
    let mut pan = FieldRule::new("IC1", "Ground surface pan evaporation").part(
        PartRule::numeric(2)
            .range(0.0, 98.0)
            .missing(&["99"])
            .agg(AggHint::Mode)
            .named("pan_period_hours"),
    );
    let measurements = [
        (
            PartRule::numeric(4)
                .range(0.0, 9998.0)
                .missing(&["9999"])
                .agg(AggHint::Sum),
            "pan_wind_movement_km",
        ),
        (
            PartRule::numeric(3)
                .range(0.0, 998.0)
                .scale(0.01)
                .missing(&["999"])
                .agg(AggHint::Sum),
            "pan_evaporation_in",
        ),
        (
            PartRule::numeric(4)
                .range(-100.0, 500.0)
                .scale(0.1)
                .missing(&["+999"])
                .agg(AggHint::Max),
            "pan_water_max_temp_c",
        ),
        (
            PartRule::numeric(4)
                .range(-100.0, 500.0)
                .scale(0.1)
                .missing(&["+999"])
                .agg(AggHint::Min),
            "pan_water_min_temp_c",
        ),
    ];
    for (value, name) in measurements {
        let quality_part = pan.parts.len() + 3;
        pan = pan
            .part(value.governed_by(quality_part, ADDITIONAL).named(name))
            .part(condition(&format!("{name}_condition_code")))
            .part(quality(ADDITIONAL, &format!("{name}_quality_code")));
    }
    b.exact(pan);
}
