//! Precipitation and snow: AA..AP.

use super::{DAY_PAIR, DAY_TRIPLE, DDHHMM, condition, digits, quality};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::{ADDITIONAL, PRECIPITATION};

fn depth(width: usize, max: f64, quality_part: usize, name: &str) -> PartRule {
    let sentinel = "9".repeat(width);
    PartRule::numeric(width)
        .range(0.0, max)
        .scale(0.1)
        .missing(&[sentinel.as_str()])
        .governed_by(quality_part, PRECIPITATION)
        .agg(AggHint::Sum)
        .named(name)
}

fn day_pair(name: &str) -> PartRule {
    PartRule::text(4)
        .pattern(DAY_PAIR)
        .missing(&["9999"])
        .named(name)
}

/// Period, depth, condition, quality: the AA / AO layout
fn period_depth(b: &mut CatalogueBuilder, family: &str, description: &str, prefix: &str) {
    b.family(family, 1, 4);
    b.template(
        FieldRule::new(family, description)
            .part(
                PartRule::numeric(2)
                    .range(0.0, 98.0)
                    .missing(&["99"])
                    .agg(AggHint::Mode)
                    .named(&format!("{prefix}_{{n}}_period_hours")),
            )
            .part(depth(4, 9998.0, 4, &format!("{prefix}_{{n}}_depth_mm")))
            .part(condition(&format!("{prefix}_{{n}}_condition_code")))
            .part(quality(
                PRECIPITATION,
                &format!("{prefix}_{{n}}_quality_code"),
            )),
    );
}

/// Short-duration maximum precipitation: AH (5-45 minutes) and AI (60-180 minutes)
fn short_duration(
    b: &mut CatalogueBuilder,
    family: &str,
    description: &str,
    period_width: usize,
    period: (f64, f64),
    prefix: &str,
) {
    let sentinel = "9".repeat(period_width);
    b.family(family, 1, 6);
    b.template(
        FieldRule::new(family, description)
            .part(
                PartRule::numeric(period_width)
                    .range(period.0, period.1)
                    .missing(&[sentinel.as_str()])
                    .agg(AggHint::Mode)
                    .named(&format!("{prefix}_{{n}}_period_minutes")),
            )
            .part(depth(4, 3000.0, 5, &format!("{prefix}_{{n}}_depth_mm")).agg(AggHint::Max))
            .part(condition(&format!("{prefix}_{{n}}_condition_code")))
            .part(
                PartRule::text(6)
                    .pattern(DDHHMM)
                    .missing(&["999999"])
                    .named(&format!("{prefix}_{{n}}_end_ddhhmm")),
            )
            .part(quality(
                PRECIPITATION,
                &format!("{prefix}_{{n}}_quality_code"),
            )),
    );
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    period_depth(b, "AA", "Liquid precipitation occurrence", "precip");
    period_depth(b, "AO", "Liquid precipitation in minutes", "precip_minutes");

    b.family("AB", 1, 1);
    b.exact(
        FieldRule::new("AB1", "Liquid precipitation monthly total")
            .part(depth(5, 50000.0, 3, "precip_monthly_total_mm"))
            .part(condition("precip_monthly_total_condition_code"))
            .part(quality(
                PRECIPITATION,
                "precip_monthly_total_quality_code",
            )),
    );

    b.family("AC", 1, 1);
    b.exact(
        FieldRule::new("AC1", "Precipitation observation history")
            .part(
                PartRule::categorical(1, &digits(0, 6))
                    .missing(&["9"])
                    .governed_by(3, ADDITIONAL)
                    .named("precip_history_duration_code"),
            )
            .part(
                PartRule::categorical(1, &["C", "I"])
                    .missing(&["9"])
                    .governed_by(3, ADDITIONAL)
                    .named("precip_history_characteristic_code"),
            )
            .part(quality(ADDITIONAL, "precip_history_quality_code")),
    );

    b.family("AD", 1, 1);
    b.exact(
        FieldRule::new("AD1", "Greatest 24-hour precipitation in month")
            .part(depth(5, 20000.0, 6, "precip_max_24h_mm").agg(AggHint::Max))
            .part(condition("precip_max_24h_condition_code"))
            .part(day_pair("precip_max_24h_dates_1"))
            .part(day_pair("precip_max_24h_dates_2"))
            .part(day_pair("precip_max_24h_dates_3"))
            .part(quality(PRECIPITATION, "precip_max_24h_quality_code")),
    );

    b.family("AE", 1, 1);
    let mut days = FieldRule::new("AE1", "Number of days with precipitation");
    for (i, threshold) in ["001", "010", "050", "100"].iter().enumerate() {
        let value_part = i * 2 + 1;
        days = days
            .part(
                PartRule::numeric(2)
                    .range(0.0, 31.0)
                    .missing(&["99"])
                    .governed_by(value_part + 1, PRECIPITATION)
                    .agg(AggHint::Max)
                    .named(&format!("precip_days_ge_{threshold}_count")),
            )
            .part(quality(
                PRECIPITATION,
                &format!("precip_days_ge_{threshold}_quality_code"),
            ));
    }
    b.exact(days);

    b.family("AG", 1, 1);
    b.exact(
        FieldRule::new("AG1", "Precipitation estimated observation")
            .part(
                PartRule::categorical(1, &digits(0, 5))
                    .missing(&["9"])
                    .named("precip_estimate_discrepancy_code"),
            )
            .part(
                PartRule::numeric(3)
                    .range(0.0, 998.0)
                    .missing(&["999"])
                    .agg(AggHint::Sum)
                    .named("precip_estimate_depth_mm"),
            ),
    );

    short_duration(
        b,
        "AH",
        "Short-duration maximum precipitation (5-45 minutes)",
        3,
        (5.0, 45.0),
        "precip_short_max",
    );
    short_duration(
        b,
        "AI",
        "Short-duration maximum precipitation (60-180 minutes)",
        4,
        (60.0, 180.0),
        "precip_long_max",
    );

    b.family("AJ", 1, 1);
    b.exact(
        FieldRule::new("AJ1", "Snow depth")
            .part(
                PartRule::numeric(4)
                    .range(0.0, 1200.0)
                    .missing(&["9999"])
                    .governed_by(3, PRECIPITATION)
                    .named("snow_depth_cm"),
            )
            .part(condition("snow_depth_condition_code"))
            .part(quality(PRECIPITATION, "snow_depth_quality_code"))
            .part(
                PartRule::numeric(6)
                    .range(0.0, 120000.0)
                    .scale(0.1)
                    .missing(&["999999"])
                    .governed_by(6, PRECIPITATION)
                    .named("snow_water_equivalent_mm"),
            )
            .part(condition("snow_water_equivalent_condition_code"))
            .part(quality(
                PRECIPITATION,
                "snow_water_equivalent_quality_code",
            )),
    );

    b.family("AK", 1, 1);
    b.exact(
        FieldRule::new("AK1", "Greatest snow depth in month")
            .part(
                PartRule::numeric(4)
                    .range(0.0, 1500.0)
                    .missing(&["9999"])
                    .governed_by(4, PRECIPITATION)
                    .agg(AggHint::Max)
                    .named("snow_depth_month_max_cm"),
            )
            .part(condition("snow_depth_month_max_condition_code"))
            .part(
                PartRule::text(6)
                    .pattern(DAY_TRIPLE)
                    .missing(&["999999"])
                    .named("snow_depth_month_max_dates"),
            )
            .part(quality(
                PRECIPITATION,
                "snow_depth_month_max_quality_code",
            )),
    );

    b.family("AL", 1, 4);
    b.template(
        FieldRule::new("AL", "Snow accumulation")
            .part(
                PartRule::numeric(2)
                    .range(0.0, 72.0)
                    .missing(&["99"])
                    .agg(AggHint::Mode)
                    .named("snow_accum_{n}_period_hours"),
            )
            .part(
                PartRule::numeric(3)
                    .range(0.0, 500.0)
                    .missing(&["999"])
                    .governed_by(4, PRECIPITATION)
                    .agg(AggHint::Sum)
                    .named("snow_accum_{n}_depth_cm"),
            )
            .part(condition("snow_accum_{n}_condition_code"))
            .part(quality(PRECIPITATION, "snow_accum_{n}_quality_code")),
    );

    b.family("AM", 1, 1);
    b.exact(
        FieldRule::new("AM1", "Greatest 24-hour snowfall in month")
            .part(
                PartRule::numeric(4)
                    .range(0.0, 2000.0)
                    .scale(0.1)
                    .missing(&["9999"])
                    .governed_by(6, PRECIPITATION)
                    .agg(AggHint::Max)
                    .named("snow_max_24h_cm"),
            )
            .part(condition("snow_max_24h_condition_code"))
            .part(day_pair("snow_max_24h_dates_1"))
            .part(day_pair("snow_max_24h_dates_2"))
            .part(day_pair("snow_max_24h_dates_3"))
            .part(quality(PRECIPITATION, "snow_max_24h_quality_code")),
    );

    b.family("AN", 1, 1);
    b.exact(
        FieldRule::new("AN1", "Snow accumulation for month")
            .part(
                PartRule::numeric(3)
                    .range(0.0, 744.0)
                    .missing(&["999"])
                    .agg(AggHint::Mode)
                    .named("snow_month_period_hours"),
            )
            .part(
                PartRule::numeric(4)
                    .range(0.0, 9998.0)
                    .scale(0.1)
                    .missing(&["9999"])
                    .governed_by(4, PRECIPITATION)
                    .agg(AggHint::Sum)
                    .named("snow_month_depth_cm"),
            )
            .part(condition("snow_month_condition_code"))
            .part(quality(PRECIPITATION, "snow_month_quality_code")),
    );

    b.family("AP", 1, 4);
    b.template(
        FieldRule::new("AP", "15-minute liquid precipitation")
            .part(depth(4, 10000.0, 3, "precip_15min_{n}_depth_mm"))
            .part(condition("precip_15min_{n}_condition_code"))
            .part(quality(PRECIPITATION, "precip_15min_{n}_quality_code")),
    );
}
