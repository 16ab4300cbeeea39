//! Test utilities for the processor module
//!
//! Builds small Global Hourly station files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

pub mod multi_station;

/// Header used by the Global Hourly CSV exports
pub const HEADER: &str = "STATION,DATE,SOURCE,LATITUDE,LONGITUDE,ELEVATION,NAME,REPORT_TYPE,CALL_SIGN,QUALITY_CONTROL,WND,CIG,VIS,TMP,DEW,SLP,AA1,REM";

/// Two hourly reports from Heathrow; the second has a missing temperature
pub const HEATHROW_ROWS: &[&str] = &[
    r#"03772099999,2023-07-01T00:50:00,4,51.4775,-0.461389,25.3,"HEATHROW, UK",FM-15,EGLL,V020,"180,1,N,0050,1","22000,1,9,N","016000,1,9,9","+0250,1","+0120,1","10132,1","01,0010,1,1","MET011METAR EGLL ""#,
    r#"03772099999,2023-07-01T01:50:00,4,51.4775,-0.461389,25.3,"HEATHROW, UK",FM-15,EGLL,V020,"999,9,C,0000,1","22000,1,9,N","016000,1,9,9","+9999,9","+0110,1","9999,1",,"#,
];

/// Write a station file with the standard header
pub fn write_station_file(dir: &Path, station: &str, rows: &[&str]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("{station}.csv"));
    let mut contents = String::from(HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents).unwrap();
    path
}
