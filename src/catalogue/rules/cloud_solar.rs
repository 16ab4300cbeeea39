//! Runway visual range, cloud layers, sunshine and solar radiation: ED, GA..GR.

use super::{crn_measured, digits, pairs, quality};
use crate::catalogue::{AggHint, CatalogueBuilder, FieldRule, PartRule};
use crate::constants::quality_codes::{ADDITIONAL, SOLAR};

const CLOUD_BASE_MAX_M: f64 = 35000.0;

fn cloud_code(width: usize, codes: &[String], name: &str) -> PartRule {
    let sentinel = "9".repeat(width);
    PartRule::categorical(width, codes)
        .missing(&[sentinel.as_str()])
        .named(name)
}

fn cloud_height(width: usize, min: f64, name: &str) -> PartRule {
    let sentinel = if min < 0.0 {
        format!("+{}", "9".repeat(width - 1))
    } else {
        "9".repeat(width)
    };
    PartRule::numeric(width)
        .range(min, CLOUD_BASE_MAX_M)
        .missing(&[sentinel.as_str()])
        .agg(AggHint::Min)
        .named(name)
}

/// Averaging period in minutes, shared by the solar sections
fn solar_period(name: &str) -> PartRule {
    PartRule::numeric(4)
        .range(1.0, 9998.0)
        .missing(&["9999"])
        .agg(AggHint::Mode)
        .named(name)
}

fn irradiance(name: &str) -> PartRule {
    PartRule::numeric(4)
        .range(0.0, 9998.0)
        .missing(&["9999"])
        .named(name)
}

pub(super) fn register(b: &mut CatalogueBuilder) {
    b.family("ED", 1, 1);
    b.exact(
        FieldRule::new("ED1", "Runway visual range")
            .part(
                PartRule::numeric(2)
                    .range(1.0, 36.0)
                    .scale(10.0)
                    .missing(&["99"])
                    .agg(AggHint::CircularMean)
                    .named("runway_direction_deg"),
            )
            .part(
                PartRule::categorical(1, &["L", "R", "C", "U"])
                    .missing(&["9"])
                    .named("runway_designator_code"),
            )
            .part(
                PartRule::numeric(4)
                    .range(0.0, 5000.0)
                    .missing(&["9999"])
                    .governed_by(4, ADDITIONAL)
                    .agg(AggHint::Min)
                    .named("runway_visual_range_m"),
            )
            .part(quality(ADDITIONAL, "runway_visual_range_quality_code")),
    );

    b.family("GA", 1, 6);
    b.template(
        FieldRule::new("GA", "Sky cover layer")
            .part(
                cloud_code(2, &pairs(0, 10), "sky_layer_{n}_coverage_code")
                    .governed_by(2, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "sky_layer_{n}_coverage_quality_code"))
            .part(cloud_height(6, -400.0, "sky_layer_{n}_base_height_m").governed_by(4, ADDITIONAL))
            .part(quality(ADDITIONAL, "sky_layer_{n}_base_height_quality_code"))
            .part(
                cloud_code(2, &pairs(0, 23), "sky_layer_{n}_cloud_type_code")
                    .governed_by(6, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "sky_layer_{n}_cloud_type_quality_code")),
    );

    b.family("GD", 1, 6);
    b.template(
        FieldRule::new("GD", "Sky cover summation state")
            .part(cloud_code(1, &digits(0, 6), "sky_summary_{n}_state_code"))
            .part(
                cloud_code(2, &pairs(0, 19), "sky_summary_{n}_coverage_code")
                    .governed_by(3, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "sky_summary_{n}_coverage_quality_code"))
            .part(
                cloud_height(6, -400.0, "sky_summary_{n}_height_m").governed_by(5, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "sky_summary_{n}_height_quality_code"))
            .part(cloud_code(1, &digits(1, 8), "sky_summary_{n}_characteristic_code")),
    );

    b.family("GE", 1, 1);
    b.exact(
        FieldRule::new("GE1", "Sky condition")
            .part(cloud_code(1, &digits(0, 7), "convective_cloud_code"))
            .part(
                PartRule::free_text()
                    .allowed(&["AGL", "ALAT", "AP", "CFP", "ISL", "LOW", "MOR", "MSL", "MSLP"])
                    .missing(&["999999"])
                    .named("cloud_vertical_datum"),
            )
            .part(cloud_height(6, -400.0, "cloud_base_upper_range_m"))
            .part(cloud_height(6, -400.0, "cloud_base_lower_range_m")),
    );

    b.family("GF", 1, 1);
    b.exact(
        FieldRule::new("GF1", "Sky condition observation")
            .part(
                cloud_code(2, &pairs(0, 10), "total_cloud_coverage_code")
                    .governed_by(3, ADDITIONAL),
            )
            .part(
                cloud_code(2, &pairs(0, 10), "opaque_cloud_coverage_code")
                    .governed_by(3, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "total_cloud_coverage_quality_code"))
            .part(
                cloud_code(2, &pairs(0, 10), "lowest_cloud_coverage_code")
                    .governed_by(5, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "lowest_cloud_coverage_quality_code"))
            .part(
                cloud_code(2, &pairs(0, 9), "low_cloud_genus_code").governed_by(7, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "low_cloud_genus_quality_code"))
            .part(
                cloud_height(5, -400.0, "lowest_cloud_base_height_m").governed_by(9, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "lowest_cloud_base_height_quality_code"))
            .part(
                cloud_code(2, &pairs(0, 9), "mid_cloud_genus_code").governed_by(11, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "mid_cloud_genus_quality_code"))
            .part(
                cloud_code(2, &pairs(0, 9), "high_cloud_genus_code").governed_by(13, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "high_cloud_genus_quality_code")),
    );

    b.family("GG", 1, 6);
    b.template(
        FieldRule::new("GG", "Below station cloud layer")
            .part(
                cloud_code(2, &pairs(0, 10), "below_cloud_{n}_coverage_code")
                    .governed_by(2, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "below_cloud_{n}_coverage_quality_code"))
            .part(cloud_height(5, 0.0, "below_cloud_{n}_top_height_m").governed_by(4, ADDITIONAL))
            .part(quality(ADDITIONAL, "below_cloud_{n}_top_height_quality_code"))
            .part(
                cloud_code(2, &pairs(0, 9), "below_cloud_{n}_type_code")
                    .governed_by(6, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "below_cloud_{n}_type_quality_code"))
            .part(
                cloud_code(2, &pairs(0, 9), "below_cloud_{n}_top_code")
                    .governed_by(8, ADDITIONAL),
            )
            .part(quality(ADDITIONAL, "below_cloud_{n}_top_quality_code")),
    );

    b.family("GH", 1, 1);
    let mut solarad = FieldRule::new("GH1", "Hourly solar radiation");
    for stat in ["avg", "min", "max", "std"] {
        solarad = crn_measured(
            solarad,
            PartRule::numeric(5)
                .range(0.0, 99998.0)
                .scale(0.1)
                .missing(&["99999"]),
            &format!("solar_radiation_{stat}_wm2"),
        );
    }
    b.exact(solarad);

    b.family("GJ", 1, 1);
    b.exact(FieldRule::new("GJ1", "Sunshine observation").value_quality(
        PartRule::numeric(4)
            .range(0.0, 6000.0)
            .missing(&["9999"])
            .agg(AggHint::Sum)
            .named("sunshine_duration_minutes"),
        ADDITIONAL,
        "sunshine_duration_quality_code",
    ));

    b.family("GK", 1, 1);
    b.exact(FieldRule::new("GK1", "Sunshine observation (percent)").value_quality(
        PartRule::numeric(3)
            .range(0.0, 100.0)
            .missing(&["999"])
            .named("sunshine_percent"),
        ADDITIONAL,
        "sunshine_percent_quality_code",
    ));

    b.family("GL", 1, 1);
    b.exact(FieldRule::new("GL1", "Sunshine observation for month").value_quality(
        PartRule::numeric(5)
            .range(0.0, 30000.0)
            .missing(&["99999"])
            .agg(AggHint::Sum)
            .named("sunshine_month_minutes"),
        ADDITIONAL,
        "sunshine_month_quality_code",
    ));

    b.family("GM", 1, 1);
    let mut irradiance_rule = FieldRule::new("GM1", "Solar irradiance")
        .part(solar_period("solar_irradiance_period_minutes"));
    for component in ["global", "direct_beam", "diffuse"] {
        let quality_part = irradiance_rule.parts.len() + 3;
        irradiance_rule = irradiance_rule
            .part(
                irradiance(&format!("{component}_irradiance_wm2"))
                    .governed_by(quality_part, SOLAR),
            )
            .part(cloud_code(
                2,
                &pairs(0, 98),
                &format!("{component}_irradiance_data_flag"),
            ))
            .part(quality(
                SOLAR,
                &format!("{component}_irradiance_quality_code"),
            ));
    }
    irradiance_rule = irradiance_rule
        .part(irradiance("uvb_global_irradiance_mwm2").governed_by(12, SOLAR))
        .part(quality(SOLAR, "uvb_global_irradiance_quality_code"));
    b.exact(irradiance_rule);

    b.family("GN", 1, 1);
    let mut radiation =
        FieldRule::new("GN1", "Solar radiation").part(solar_period("solar_radiation_period_minutes"));
    for component in [
        "upwelling_global",
        "downwelling_thermal_ir",
        "upwelling_thermal_ir",
        "photosynthetically_active",
    ] {
        let quality_part = radiation.parts.len() + 2;
        radiation = radiation
            .part(
                irradiance(&format!("{component}_radiation_wm2")).governed_by(quality_part, SOLAR),
            )
            .part(quality(
                SOLAR,
                &format!("{component}_radiation_quality_code"),
            ));
    }
    radiation = radiation
        .part(
            PartRule::numeric(3)
                .range(0.0, 180.0)
                .missing(&["999"])
                .governed_by(11, SOLAR)
                .named("solar_zenith_angle_deg"),
        )
        .part(quality(SOLAR, "solar_zenith_angle_quality_code"));
    b.exact(radiation);

    b.family("GO", 1, 1);
    let mut net = FieldRule::new("GO1", "Net solar radiation")
        .part(solar_period("net_radiation_period_minutes"));
    for component in ["net_solar", "net_infrared", "net"] {
        let quality_part = net.parts.len() + 2;
        net = net
            .part(
                PartRule::numeric(4)
                    .range(-999.0, 9998.0)
                    .missing(&["9999"])
                    .governed_by(quality_part, SOLAR)
                    .named(&format!("{component}_radiation_total_wm2")),
            )
            .part(quality(
                SOLAR,
                &format!("{component}_radiation_total_quality_code"),
            ));
    }
    b.exact(net);

    b.family("GP", 1, 1);
    let mut modeled = FieldRule::new("GP1", "Modeled solar irradiance")
        .part(solar_period("modeled_irradiance_period_minutes"));
    for component in ["global_horizontal", "direct_normal", "diffuse_horizontal"] {
        modeled = modeled
            .part(irradiance(&format!("modeled_{component}_wm2")))
            .part(cloud_code(
                2,
                &pairs(0, 98),
                &format!("modeled_{component}_source_flag"),
            ))
            .part(
                PartRule::numeric(3)
                    .range(0.0, 100.0)
                    .missing(&["999"])
                    .agg(AggHint::Max)
                    .named(&format!("modeled_{component}_uncertainty_percent")),
            );
    }
    b.exact(modeled);

    b.family("GQ", 1, 1);
    b.exact(
        FieldRule::new("GQ1", "Hourly solar angle")
            .part(solar_period("solar_angle_period_minutes"))
            .part(
                PartRule::numeric(4)
                    .range(0.0, 3600.0)
                    .scale(0.1)
                    .missing(&["9999"])
                    .governed_by(3, SOLAR)
                    .named("solar_mean_zenith_deg"),
            )
            .part(quality(SOLAR, "solar_mean_zenith_quality_code"))
            .part(
                PartRule::numeric(4)
                    .range(0.0, 3600.0)
                    .scale(0.1)
                    .missing(&["9999"])
                    .governed_by(5, SOLAR)
                    .agg(AggHint::CircularMean)
                    .named("solar_mean_azimuth_deg"),
            )
            .part(quality(SOLAR, "solar_mean_azimuth_quality_code")),
    );

    b.family("GR", 1, 1);
    b.exact(
        FieldRule::new("GR1", "Hourly extraterrestrial radiation")
            .part(solar_period("extraterrestrial_period_minutes"))
            .part(irradiance("extraterrestrial_horizontal_wm2").governed_by(3, SOLAR))
            .part(quality(SOLAR, "extraterrestrial_horizontal_quality_code"))
            .part(irradiance("extraterrestrial_normal_wm2").governed_by(5, SOLAR))
            .part(quality(SOLAR, "extraterrestrial_normal_quality_code")),
    );
}
