//! Parameter-code validators for element quality data (EQD) fields.

use crate::catalogue::EqdValidator;

/// Legacy EQD parameter codes
pub const LEGACY_PARAMETERS: &[&str] = &[
    "ALTP", "APC3", "CIG", "DEW", "DPTP", "GAF", "GA1", "GA2", "GA3", "GA4", "GD1", "GD2", "GD3",
    "GD4", "MA1", "MW1", "MW2", "MW3", "PRCP", "PRSWA1", "PRSWM1", "PRSWM2", "PRSWM3", "SLP",
    "TMP", "TMPW", "VIS", "WDIR", "WIND", "WND", "WSPD",
];

/// Element codes accepted as the first four characters of an `N`-prefix code
pub const ELEMENT_CODES: &[&str] = &[
    "AWND", "DAPR", "EVAP", "MDPR", "MNPN", "MXPN", "PRCP", "PSUN", "SNOW", "SNWD", "TAVG", "TMAX",
    "TMIN", "TOBS", "TSUN", "WDF2", "WDF5", "WDFG", "WESD", "WESF", "WSF2", "WSF5", "WSFG",
];

/// Measurement flags (5th character)
pub const MEASUREMENT_FLAGS: &[char] = &['0', 'B', 'D', 'H', 'K', 'L', 'O', 'P', 'T', 'W'];

/// Quality flags (6th character)
pub const QUALITY_FLAGS: &[char] = &[
    '0', 'D', 'G', 'I', 'K', 'L', 'M', 'N', 'O', 'R', 'S', 'T', 'W', 'X', 'Z',
];

/// True when `code` is acceptable under `validator`
pub fn is_valid_parameter(validator: EqdValidator, code: &str) -> bool {
    match validator {
        EqdValidator::Legacy => is_legacy(code),
        EqdValidator::LegacyOrMsd => is_legacy(code) || is_msd(code),
        EqdValidator::ElementSchema => is_element_schema(code),
    }
}

fn is_legacy(code: &str) -> bool {
    LEGACY_PARAMETERS.contains(&code)
}

/// `A` followed by exactly five digits
fn is_msd(code: &str) -> bool {
    code.len() == 6
        && code.starts_with('A')
        && code[1..].chars().all(|c| c.is_ascii_digit())
}

/// `EEEEab`: known element code, measurement flag, quality flag
fn is_element_schema(code: &str) -> bool {
    if code.len() != 6 || !code.is_ascii() {
        return false;
    }
    let (element, flags) = code.split_at(4);
    let mut flags = flags.chars();
    let (Some(a), Some(b)) = (flags.next(), flags.next()) else {
        return false;
    };
    ELEMENT_CODES.contains(&element) && MEASUREMENT_FLAGS.contains(&a) && QUALITY_FLAGS.contains(&b)
}
