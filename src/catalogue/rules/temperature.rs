//! Additional temperature sections: KA..KG.

use super::{DAY_TRIPLE, quality};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::ADDITIONAL;

fn period(width: usize, min: f64, max: f64, scale: Option<f64>, name: &str) -> PartRule {
    let sentinel = "9".repeat(width);
    let rule = PartRule::numeric(width)
        .range(min, max)
        .missing(&[sentinel.as_str()])
        .agg(AggHint::Mode)
        .named(name);
    match scale {
        Some(scale) => rule.scale(scale),
        None => rule,
    }
}

fn code(codes: &[&str], name: &str) -> PartRule {
    PartRule::categorical(1, codes)
        .missing(&["9"])
        .named(name)
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    b.family("KA", 1, 4);
    b.template(
        FieldRule::new("KA", "Extreme air temperature")
            .part(period(3, 0.0, 480.0, Some(0.1), "extreme_temp_{n}_period_hours"))
            .part(code(&["N", "M", "O", "P"], "extreme_temp_{n}_code"))
            .part(
                PartRule::numeric(5)
                    .range(-932.0, 618.0)
                    .scale(0.1)
                    .missing(&["+9999"])
                    .governed_by(4, ADDITIONAL)
                    .named("extreme_temp_{n}_c"),
            )
            .part(quality(ADDITIONAL, "extreme_temp_{n}_quality_code")),
    );

    b.family("KB", 1, 3);
    b.template(
        FieldRule::new("KB", "Average air temperature")
            .part(period(3, 1.0, 744.0, None, "avg_temp_{n}_period_hours"))
            .part(code(&["A", "M", "N"], "avg_temp_{n}_code"))
            .part(
                PartRule::numeric(5)
                    .range(-9900.0, 6300.0)
                    .scale(0.01)
                    .missing(&["+9999"])
                    .governed_by(4, ADDITIONAL)
                    .named("avg_temp_{n}_c"),
            )
            .part(quality(ADDITIONAL, "avg_temp_{n}_quality_code")),
    );

    b.family("KC", 1, 2);
    b.template(
        FieldRule::new("KC", "Extreme air temperature for the month")
            .part(code(&["N", "M"], "month_extreme_temp_{n}_code"))
            .part(code(&["1"], "month_extreme_temp_{n}_condition_code"))
            .part(
                PartRule::numeric(5)
                    .range(-1100.0, 630.0)
                    .scale(0.1)
                    .missing(&["+9999"])
                    .governed_by(5, ADDITIONAL)
                    .named("month_extreme_temp_{n}_c"),
            )
            .part(
                PartRule::text(6)
                    .pattern(DAY_TRIPLE)
                    .missing(&["999999"])
                    .named("month_extreme_temp_{n}_dates"),
            )
            .part(quality(ADDITIONAL, "month_extreme_temp_{n}_quality_code")),
    );

    b.family("KD", 1, 2);
    b.template(
        FieldRule::new("KD", "Heating and cooling degree days")
            .part(period(3, 1.0, 744.0, None, "degree_days_{n}_period_hours"))
            .part(code(&["H", "C"], "degree_days_{n}_code"))
            .part(
                PartRule::numeric(4)
                    .range(0.0, 5000.0)
                    .missing(&["9999"])
                    .governed_by(4, ADDITIONAL)
                    .agg(AggHint::Sum)
                    .named("degree_days_{n}_value"),
            )
            .part(quality(ADDITIONAL, "degree_days_{n}_quality_code")),
    );

    b.family("KE", 1, 1);
    let mut extreme_days = FieldRule::new("KE1", "Extreme temperatures, number of days");
    for threshold in [
        "max_le_32f",
        "max_ge_90f",
        "min_le_32f",
        "min_le_0f",
    ] {
        let quality_part = extreme_days.parts.len() + 2;
        extreme_days = extreme_days
            .part(
                PartRule::numeric(2)
                    .range(0.0, 31.0)
                    .missing(&["99"])
                    .governed_by(quality_part, ADDITIONAL)
                    .agg(AggHint::Max)
                    .named(&format!("days_{threshold}_count")),
            )
            .part(quality(
                ADDITIONAL,
                &format!("days_{threshold}_quality_code"),
            ));
    }
    b.exact(extreme_days);

    b.family("KF", 1, 1);
    b.exact(FieldRule::new("KF1", "Hourly calculated temperature").value_quality(
        PartRule::numeric(5)
            .range(-9999.0, 9998.0)
            .scale(0.1)
            .missing(&["+9999"])
            .named("calculated_temp_c"),
        ADDITIONAL,
        "calculated_temp_quality_code",
    ));

    b.family("KG", 1, 2);
    b.template(
        FieldRule::new("KG", "Average dew point and wet bulb temperature")
            .part(period(3, 1.0, 744.0, None, "avg_dew_wet_{n}_period_hours"))
            .part(code(&["D", "W"], "avg_dew_wet_{n}_code"))
            .part(
                PartRule::numeric(5)
                    .range(-9900.0, 6300.0)
                    .scale(0.01)
                    .missing(&["+9999"])
                    .governed_by(5, ADDITIONAL)
                    .named("avg_dew_wet_{n}_c"),
            )
            .part(code(&["D"], "avg_dew_wet_{n}_derived_code"))
            .part(quality(ADDITIONAL, "avg_dew_wet_{n}_quality_code")),
    );
}
