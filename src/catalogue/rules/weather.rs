//! Present and past weather: AT, AU, AW, AX, AY, AZ, MV, MW.

use super::{digits, pairs, quality};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::ADDITIONAL;

fn code(width: usize, codes: &[String], missing: &str, name: &str) -> PartRule {
    PartRule::categorical(width, codes)
        .missing(&[missing])
        .named(name)
}

/// Past weather: condition, quality, period, quality (AX, AY, AZ)
fn past_weather(
    b: &mut CatalogueBuilder,
    family: &str,
    max: u8,
    description: &str,
    condition: PartRule,
    prefix: &str,
) {
    b.family(family, 1, max);
    b.template(
        FieldRule::new(family, description)
            .part(
                condition
                    .governed_by(2, ADDITIONAL)
                    .named(&format!("{prefix}_{{n}}_condition_code")),
            )
            .part(quality(
                ADDITIONAL,
                &format!("{prefix}_{{n}}_condition_quality_code"),
            ))
            .part(
                PartRule::numeric(2)
                    .range(1.0, 24.0)
                    .missing(&["99"])
                    .governed_by(4, ADDITIONAL)
                    .agg(AggHint::Mode)
                    .named(&format!("{prefix}_{{n}}_period_hours")),
            )
            .part(quality(
                ADDITIONAL,
                &format!("{prefix}_{{n}}_period_quality_code"),
            )),
    );
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    b.family("AT", 1, 8);
    b.template(
        FieldRule::new("AT", "Daily present weather observation")
            .part(
                PartRule::categorical(2, &["AU", "AW", "MW"])
                    .named("daily_weather_{n}_source_element"),
            )
            .part(
                code(2, &pairs(1, 22), "99", "daily_weather_{n}_type_code")
                    .governed_by(4, ADDITIONAL),
            )
            .part(PartRule::free_text().named("daily_weather_{n}_abbreviation"))
            .part(quality(ADDITIONAL, "daily_weather_{n}_quality_code")),
    );

    b.family("AU", 1, 9);
    b.template(
        FieldRule::new("AU", "Present weather observation (automated)")
            .part(code(1, &digits(0, 4), "9", "present_weather_{n}_intensity_code"))
            .part(code(1, &digits(0, 8), "9", "present_weather_{n}_descriptor_code"))
            .part(code(
                2,
                &pairs(0, 9),
                "99",
                "present_weather_{n}_precipitation_code",
            ))
            .part(code(1, &digits(1, 7), "9", "present_weather_{n}_obscuration_code"))
            .part(code(1, &digits(1, 5), "9", "present_weather_{n}_other_code"))
            .part(code(1, &digits(1, 3), "9", "present_weather_{n}_combination_code"))
            .part(quality(ADDITIONAL, "present_weather_{n}_quality_code")),
    );

    b.family("AW", 1, 4);
    b.template(
        FieldRule::new("AW", "Present weather observation (automated occurrence)").value_quality(
            PartRule::categorical(2, &pairs(0, 99)).named("automated_weather_{n}_code"),
            ADDITIONAL,
            "automated_weather_{n}_quality_code",
        ),
    );

    past_weather(
        b,
        "AX",
        6,
        "Past weather summary of day",
        PartRule::categorical(2, &pairs(0, 10)).missing(&["99"]),
        "past_weather_summary",
    );
    past_weather(
        b,
        "AY",
        2,
        "Past weather observation (manual)",
        PartRule::categorical(1, &digits(0, 9)),
        "past_weather_manual",
    );
    past_weather(
        b,
        "AZ",
        2,
        "Past weather observation (automated)",
        PartRule::categorical(1, &digits(0, 9)),
        "past_weather_auto",
    );

    b.family("MV", 1, 7);
    b.template(
        FieldRule::new("MV", "Present weather in vicinity").value_quality(
            code(2, &pairs(0, 9), "99", "vicinity_weather_{n}_code"),
            ADDITIONAL,
            "vicinity_weather_{n}_quality_code",
        ),
    );

    b.family("MW", 1, 7);
    b.template(
        FieldRule::new("MW", "Present weather observation (manual)").value_quality(
            PartRule::categorical(2, &pairs(0, 99)).named("manual_weather_{n}_code"),
            ADDITIONAL,
            "manual_weather_{n}_quality_code",
        ),
    );
}
