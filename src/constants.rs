//! Application constants for the ISD processor
//!
//! This module contains the quality code alphabets, control-column allow-sets,
//! output column naming conventions and processing defaults used throughout
//! the decoder.

// =============================================================================
// Quality Code Alphabets
// =============================================================================

/// Quality code alphabets as defined in the ISD format document
pub mod quality_codes {
    /// Every quality code that may appear anywhere in an ISD record.
    /// Used when a governed part declares no explicit `allowed_quality`.
    pub const GLOBAL: &[&str] = &[
        "0", "1", "2", "3", "4", "5", "6", "7", "9", "A", "C", "I", "M", "P", "R", "U",
    ];

    /// Restricted alphabet for mandatory-section values (wind, ceiling,
    /// visibility, sea level pressure)
    pub const MANDATORY: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "9"];

    /// Air temperature and dew point quality codes
    pub const TEMPERATURE: &[&str] = &[
        "0", "1", "2", "3", "4", "5", "6", "7", "9", "A", "C", "I", "M", "P", "R", "U",
    ];

    /// Typical additional-data quality codes
    pub const ADDITIONAL: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "9", "M"];

    /// Precipitation quality codes (includes the estimated/interpolated letters)
    pub const PRECIPITATION: &[&str] = &[
        "0", "1", "2", "3", "4", "5", "6", "7", "9", "A", "I", "M", "P", "R", "U",
    ];

    /// Pressure quality codes for the additional data section
    pub const PRESSURE: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "9", "M"];

    /// Climate reference network quality control codes
    pub const CRN_QC: &[&str] = &["1", "3", "9"];

    /// Climate reference network data flags
    pub const CRN_FLAG: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

    /// Solar radiation (SOLARAD) quality codes
    pub const SOLAR: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
}

// =============================================================================
// Control Columns
// =============================================================================

/// Control column names and validation bounds
pub mod control {
    pub const STATION: &str = "STATION";
    pub const DATE: &str = "DATE";
    pub const TIME: &str = "TIME";
    pub const SOURCE: &str = "SOURCE";
    pub const LATITUDE: &str = "LATITUDE";
    pub const LONGITUDE: &str = "LONGITUDE";
    pub const ELEVATION: &str = "ELEVATION";
    pub const NAME: &str = "NAME";
    pub const REPORT_TYPE: &str = "REPORT_TYPE";
    pub const CALL_SIGN: &str = "CALL_SIGN";
    pub const QUALITY_CONTROL: &str = "QUALITY_CONTROL";

    /// All control columns in output order
    pub const ALL: &[&str] = &[
        STATION,
        DATE,
        TIME,
        SOURCE,
        LATITUDE,
        LONGITUDE,
        ELEVATION,
        NAME,
        REPORT_TYPE,
        CALL_SIGN,
        QUALITY_CONTROL,
    ];

    pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
    pub const ELEVATION_RANGE: (f64, f64) = (-400.0, 8850.0);

    /// Call letter identifier pattern (after trimming)
    pub const CALL_SIGN_PATTERN: &str = r"^[A-Z0-9]{3,6}$";

    /// Call sign value meaning "no call sign"
    pub const CALL_SIGN_MISSING: &str = "99999";

    /// Data source flags
    pub const SOURCE_CODES: &[&str] = &[
        "1", "2", "3", "4", "5", "6", "7", "8", "9", "A", "B", "C", "D", "E", "F", "G", "H", "I",
        "J", "K", "L", "M", "N", "O",
    ];

    /// Geophysical report type codes
    pub const REPORT_TYPES: &[&str] = &[
        "AERO", "AUST", "AUTO", "BOGUS", "BRAZ", "COOPD", "COOPS", "CRB", "CRN05", "CRN15",
        "FM-12", "FM-13", "FM-14", "FM-15", "FM-16", "FM-18", "GREEN", "MESOH", "MESOS", "MESOW",
        "MEXIC", "NSRDB", "PCP15", "PCP60", "S-S-A", "SA-AU", "SAO", "SAOSP", "SHEF", "SMARS",
        "SOD", "SOM", "SURF", "SY-AE", "SY-AU", "SY-MT", "SY-SA", "WBO", "WNO", "99999",
    ];

    /// Quality control process names
    pub const QUALITY_CONTROL_CODES: &[&str] = &["V010", "V020", "V030"];
}

// =============================================================================
// Special Columns
// =============================================================================

/// Section marker column dropped when it only carries its own name
pub const ADD_MARKER: &str = "ADD";

/// Remarks column
pub const REMARKS_COLUMN: &str = "REM";

/// Original observation elements column
pub const QNN_COLUMN: &str = "QNN";

// =============================================================================
// Output Column Naming
// =============================================================================

/// Separator between identifier and part key in internal column names
pub const KEY_SEPARATOR: &str = "__";

pub const SUFFIX_QC_PASS: &str = "__qc_pass";
pub const SUFFIX_QC_STATUS: &str = "__qc_status";
pub const SUFFIX_QC_REASON: &str = "__qc_reason";

/// Part key used for a field-level arity failure
pub const ARITY_KEY: &str = "arity";

pub const ROW_HAS_ANY_USABLE_METRIC: &str = "row_has_any_usable_metric";
pub const USABLE_METRIC_COUNT: &str = "usable_metric_count";
pub const USABLE_METRIC_FRACTION: &str = "usable_metric_fraction";

// =============================================================================
// Clamp Targets
// =============================================================================

/// Ceiling heights at or above this value are reported as unlimited
pub const CEILING_UNLIMITED_M: f64 = 22000.0;

/// Visibility distances at or above this value saturate
pub const VISIBILITY_MAX_M: f64 = 160000.0;

// =============================================================================
// Logging
// =============================================================================

/// Prefix carried by every strict-mode parse log record
pub const STRICT_LOG_PREFIX: &str = "[PARSE_STRICT]";

// =============================================================================
// Processing Defaults
// =============================================================================

/// Rows handed to a single blocking decode task
pub const DEFAULT_ROWS_PER_CHUNK: usize = 4096;

/// Files decoded concurrently
pub const DEFAULT_MAX_CONCURRENT_FILES: usize = 8;

/// Observation file pattern
pub const OBSERVATION_FILE_EXTENSION: &str = "csv";
