//! Climate reference network sections: CB..CX.
//!
//! Nearly every CRN measurement is followed by a QC code (`1`, `3`, `9`) and a
//! data flag (`0`..`9`), so the tables are built from measured triples.

use super::{HHMM, crn_measured, digits, pairs};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::{CRN_FLAG, CRN_QC};

/// Signed tenths with a `+9999`-style sentinel
fn signed_tenths(width: usize, min: f64, max: f64) -> PartRule {
    let sentinel = format!("+{}", "9".repeat(width - 1));
    PartRule::numeric(width)
        .range(min, max)
        .scale(0.1)
        .missing(&[sentinel.as_str()])
}

/// Unsigned value with an all-nines sentinel
fn unsigned(width: usize, max: f64) -> PartRule {
    let sentinel = "9".repeat(width);
    PartRule::numeric(width)
        .range(0.0, max)
        .missing(&[sentinel.as_str()])
}

fn hhmm(name: &str) -> PartRule {
    PartRule::text(4)
        .pattern(HHMM)
        .missing(&["9999"])
        .named(name)
}

/// Quality and flag parts that follow a time-of-day part
fn time_flags(rule: FieldRule, time: PartRule, name: &str) -> FieldRule {
    rule.part(time)
        .part(PartRule::quality(CRN_QC).named(&format!("{name}_qc")))
        .part(PartRule::quality(CRN_FLAG).named(&format!("{name}_flag")))
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    b.family("CB", 1, 2);
    b.template(crn_measured(
        FieldRule::new("CB", "Subhourly observed liquid precipitation (secondary sensor)").part(
            PartRule::numeric(2)
                .range(5.0, 60.0)
                .missing(&["99"])
                .agg(AggHint::Mode)
                .named("crn_precip_secondary_{n}_period_minutes"),
        ),
        signed_tenths(6, -99999.0, 99998.0).agg(AggHint::Sum),
        "crn_precip_secondary_{n}_depth_mm",
    ));

    b.family("CF", 1, 3);
    b.template(crn_measured(
        FieldRule::new("CF", "Hourly fan speed"),
        unsigned(4, 9998.0).scale(0.1),
        "crn_fan_{n}_speed_rps",
    ));

    b.family("CG", 1, 3);
    b.template(crn_measured(
        FieldRule::new("CG", "Subhourly observed liquid precipitation (primary sensor)"),
        signed_tenths(6, -99999.0, 99998.0).agg(AggHint::Sum),
        "crn_precip_primary_{n}_depth_mm",
    ));

    b.family("CH", 1, 2);
    let humidity = FieldRule::new("CH", "Hourly/subhourly relative humidity and temperature").part(
        PartRule::numeric(2)
            .range(0.0, 60.0)
            .missing(&["99"])
            .agg(AggHint::Mode)
            .named("crn_rh_temp_{n}_period_minutes"),
    );
    let humidity = crn_measured(
        humidity,
        signed_tenths(5, -9999.0, 9998.0),
        "crn_rh_temp_{n}_air_temp_c",
    );
    b.template(crn_measured(
        humidity,
        unsigned(4, 1000.0).scale(0.1),
        "crn_rh_temp_{n}_rh_percent",
    ));

    b.family("CI", 1, 1);
    let mut extremes = FieldRule::new("CI1", "Hourly relative humidity and temperature extremes");
    extremes = crn_measured(
        extremes,
        signed_tenths(5, -9999.0, 9998.0).agg(AggHint::Min),
        "crn_rh_min_temp_c",
    );
    extremes = crn_measured(
        extremes,
        signed_tenths(5, -9999.0, 9998.0).agg(AggHint::Max),
        "crn_rh_max_temp_c",
    );
    extremes = crn_measured(
        extremes,
        unsigned(5, 99998.0).scale(0.1),
        "crn_rh_std_temp_c",
    );
    extremes = crn_measured(
        extremes,
        unsigned(5, 99998.0).scale(0.1),
        "crn_rh_std_rh_percent",
    );
    b.exact(extremes);

    b.family("CN", 1, 4);
    let mut battery = FieldRule::new("CN1", "Battery voltage");
    for name in [
        "crn_battery_avg_voltage_v",
        "crn_battery_full_load_voltage_v",
        "crn_datalogger_voltage_v",
    ] {
        battery = crn_measured(battery, unsigned(4, 9998.0).scale(0.1), name);
    }
    b.exact(battery);

    let mut diagnostic = FieldRule::new("CN2", "Diagnostic equipment");
    diagnostic = crn_measured(
        diagnostic,
        signed_tenths(5, -9999.0, 9998.0),
        "crn_panel_temp_c",
    );
    diagnostic = crn_measured(
        diagnostic,
        signed_tenths(5, -9999.0, 9998.0).agg(AggHint::Max),
        "crn_inlet_max_temp_c",
    );
    diagnostic = crn_measured(
        diagnostic,
        unsigned(2, 60.0).agg(AggHint::Sum),
        "crn_door_open_minutes",
    );
    b.exact(diagnostic);

    let mut secondary = FieldRule::new("CN3", "Secondary diagnostic equipment");
    secondary = crn_measured(
        secondary,
        unsigned(6, 999998.0).scale(0.1),
        "crn_reference_resistor_ohm",
    );
    secondary = crn_measured(
        secondary,
        unsigned(6, 999998.0).agg(AggHint::Drop),
        "crn_datalogger_signature",
    );
    b.exact(secondary);

    let mut hourly = FieldRule::new("CN4", "Secondary hourly diagnostic equipment");
    hourly = crn_measured(
        hourly,
        PartRule::categorical(1, &digits(0, 1)).missing(&["9"]),
        "crn_heater_flag",
    );
    hourly = crn_measured(
        hourly,
        PartRule::categorical(1, &digits(0, 1)).missing(&["9"]),
        "crn_door_flag",
    );
    hourly = crn_measured(
        hourly,
        unsigned(3, 500.0).scale(0.1),
        "crn_forward_rf_power_w",
    );
    hourly = crn_measured(
        hourly,
        unsigned(3, 500.0).scale(0.1),
        "crn_reflected_rf_power_w",
    );
    b.exact(hourly);

    b.family("CO", 1, 9);
    b.exact(
        FieldRule::new("CO1", "Network metadata")
            .part(
                PartRule::categorical(2, &pairs(0, 98))
                    .missing(&["99"])
                    .named("climate_division_code"),
            )
            .part(
                PartRule::numeric(3)
                    .range(-12.0, 12.0)
                    .missing(&["+99"])
                    .agg(AggHint::Mode)
                    .named("utc_lst_offset_hours"),
            ),
    );
    b.template(
        FieldRule::new("CO", "US cooperative network element time offset")
            .part(
                PartRule::text(3)
                    .pattern("[A-Z0-9]{3}")
                    .missing(&["999"])
                    .named("coop_offset_{n}_element"),
            )
            .part(
                PartRule::numeric(5)
                    .range(-9999.0, 9998.0)
                    .missing(&["+9999"])
                    .agg(AggHint::Mode)
                    .named("coop_offset_{n}_minutes"),
            ),
    );

    b.family("CR", 1, 1);
    b.exact(crn_measured(
        FieldRule::new("CR1", "CRN control section"),
        unsigned(5, 99998.0).scale(0.001).agg(AggHint::Drop),
        "crn_datalogger_version",
    ));

    b.family("CT", 1, 3);
    b.template(crn_measured(
        FieldRule::new("CT", "Subhourly temperature"),
        signed_tenths(5, -9999.0, 9998.0),
        "crn_subhourly_{n}_temp_c",
    ));

    b.family("CU", 1, 3);
    let temperature = crn_measured(
        FieldRule::new("CU", "Hourly temperature"),
        signed_tenths(5, -9999.0, 9998.0),
        "crn_hourly_{n}_temp_c",
    );
    b.template(crn_measured(
        temperature,
        unsigned(4, 9998.0).scale(0.1),
        "crn_hourly_{n}_temp_std_c",
    ));

    b.family("CV", 1, 3);
    let mut extreme = FieldRule::new("CV", "Hourly temperature extreme");
    extreme = crn_measured(
        extreme,
        signed_tenths(5, -9999.0, 9998.0).agg(AggHint::Min),
        "crn_extreme_{n}_min_temp_c",
    );
    extreme = time_flags(
        extreme,
        hhmm("crn_extreme_{n}_min_time"),
        "crn_extreme_{n}_min_time",
    );
    extreme = crn_measured(
        extreme,
        signed_tenths(5, -9999.0, 9998.0).agg(AggHint::Max),
        "crn_extreme_{n}_max_temp_c",
    );
    extreme = time_flags(
        extreme,
        hhmm("crn_extreme_{n}_max_time"),
        "crn_extreme_{n}_max_time",
    );
    b.template(extreme);

    b.family("CW", 1, 1);
    let wetness = crn_measured(
        FieldRule::new("CW1", "Subhourly wetness"),
        unsigned(5, 99998.0).scale(0.1),
        "crn_wetness_1",
    );
    b.exact(crn_measured(
        wetness,
        unsigned(5, 99998.0).scale(0.1),
        "crn_wetness_2",
    ));

    b.family("CX", 1, 3);
    let mut geonor = crn_measured(
        FieldRule::new("CX", "Hourly Geonor vibrating wire summary"),
        signed_tenths(6, -99999.0, 99998.0).agg(AggHint::Sum),
        "crn_geonor_{n}_precip_mm",
    );
    for stat in ["avg", "min", "max"] {
        geonor = crn_measured(
            geonor,
            unsigned(4, 9998.0),
            &format!("crn_geonor_{{n}}_freq_{stat}_hz"),
        );
    }
    b.template(geonor);
}
