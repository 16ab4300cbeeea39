//! End-to-end decoder tests through the public API

use isd_processor::{QcReason, Strictness, Value, decode_row, decode_rows};
use std::collections::BTreeMap;

fn decode(cells: &[(&str, &str)], strictness: Strictness) -> isd_processor::CleanRow {
    let row: BTreeMap<&str, &str> = cells.iter().copied().collect();
    decode_row(&row, strictness).unwrap()
}

#[test]
fn test_temperature_passes() {
    let row = decode(&[("TMP", "+0250,1")], Strictness::Strict);
    assert_eq!(row.number("temperature_c"), Some(25.0));
    assert_eq!(row.qc_pass("temperature_c"), Some(true));
    assert_eq!(row.qc_reason("temperature_c"), None);
}

#[test]
fn test_temperature_sentinel() {
    let row = decode(&[("TMP", "+9999,1")], Strictness::Strict);
    assert_eq!(row.get("temperature_c"), Some(&Value::Null));
    assert_eq!(
        row.get("temperature_c__qc_status"),
        Some(&Value::text("MISSING"))
    );
    assert_eq!(
        row.qc_reason("temperature_c"),
        Some(QcReason::SentinelMissing)
    );
}

#[test]
fn test_wind_direction_bad_quality_keeps_speed() {
    let row = decode(&[("WND", "180,8,N,0050,1")], Strictness::Strict);
    assert_eq!(row.get("wind_direction_deg"), Some(&Value::Null));
    assert_eq!(
        row.qc_reason("wind_direction_deg"),
        Some(QcReason::BadQualityCode)
    );
    assert_eq!(row.number("wind_speed_ms"), Some(5.0));
}

#[test]
fn test_pressure_bad_quality_keeps_altimeter() {
    let row = decode(&[("MA1", "10132,1,09876,8")], Strictness::Strict);
    assert_eq!(row.number("altimeter_setting_hpa"), Some(1013.2));
    assert_eq!(
        row.qc_reason("station_pressure_hpa"),
        Some(QcReason::BadQualityCode)
    );
}

#[test]
fn test_sea_level_pressure_strictness() {
    let strict = decode(&[("SLP", "9999,1")], Strictness::Strict);
    assert_eq!(
        strict.qc_reason("sea_level_pressure_hpa"),
        Some(QcReason::MalformedToken)
    );

    let permissive = decode(&[("SLP", "9999,1")], Strictness::Permissive);
    assert_eq!(
        permissive.qc_reason("sea_level_pressure_hpa"),
        Some(QcReason::SentinelMissing)
    );
}

#[test]
fn test_wind_arity() {
    let row = decode(&[("WND", "180,1,N,0050")], Strictness::Strict);
    assert!(!row.contains("wind_direction_deg"));
    assert_eq!(row.get("WND__arity__qc_pass"), Some(&Value::Bool(false)));
    assert_eq!(
        row.get("WND__arity__qc_reason"),
        Some(&Value::text("BAD_ARITY"))
    );
}

#[test]
fn test_full_observation_row() {
    let row = decode(
        &[
            ("STATION", "03772099999"),
            ("DATE", "2023-07-01T13:50:00"),
            ("SOURCE", "4"),
            ("REPORT_TYPE", "FM-15"),
            ("WND", "250,1,N,0046,1"),
            ("CIG", "01372,1,9,N"),
            ("VIS", "010000,1,9,9"),
            ("TMP", "+0231,1"),
            ("DEW", "+0121,1"),
            ("SLP", "10187,1"),
            ("AA1", "01,0000,9,1"),
            ("REM", "MET011METAR EGLL "),
        ],
        Strictness::Strict,
    );

    assert_eq!(row.get("timestamp_utc"), Some(&Value::text("2023-07-01T13:50:00Z")));
    assert_eq!(row.number("wind_direction_deg"), Some(250.0));
    assert_eq!(row.number("ceiling_height_m"), Some(1372.0));
    assert_eq!(row.number("visibility_m"), Some(10000.0));
    assert_eq!(row.number("sea_level_pressure_hpa"), Some(1018.7));

    let metrics = row.metrics().unwrap();
    assert!(metrics.row_has_any_usable_metric);
    assert!(metrics.usable_metric_count >= 8);
    assert!(metrics.usable_metric_fraction <= 1.0);
}

#[test]
fn test_decode_rows_keeps_order() {
    let rows = vec![
        BTreeMap::from([("TMP", "+0010,1")]),
        BTreeMap::from([("TMP", "+0020,1")]),
    ];
    let decoded = decode_rows(rows, Strictness::Permissive).unwrap();
    assert_eq!(decoded[0].number("temperature_c"), Some(1.0));
    assert_eq!(decoded[1].number("temperature_c"), Some(2.0));
}
