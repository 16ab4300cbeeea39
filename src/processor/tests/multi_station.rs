//! Multi-station processing integration tests

use super::{HEATHROW_ROWS, write_station_file};
use crate::config::IsdConfig;
use crate::processor::DatasetProcessor;
use polars::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a two-year, two-station layout with differing identifiers
fn create_multi_station_dataset(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let input = temp_dir.path().join("global-hourly");

    write_station_file(&input.join("2022"), "03772099999", HEATHROW_ROWS);
    write_station_file(&input.join("2023"), "03772099999", &HEATHROW_ROWS[..1]);

    // A marine station reporting only a subset of columns plus an extra identifier
    let marine = input.join("2023").join("99999999999.csv");
    std::fs::write(
        &marine,
        "STATION,DATE,TMP,MA1\n\
         99999999999,2023-07-02T12:00:00,\"+0180,1\",\"10132,1,09876,1\"\n",
    )
    .unwrap();

    (input, temp_dir.path().join("all.parquet"))
}

#[tokio::test]
async fn test_multi_station_union() {
    let temp_dir = TempDir::new().unwrap();
    let (input, output_path) = create_multi_station_dataset(&temp_dir);

    let config = IsdConfig::default()
        .with_max_concurrent_files(2)
        .with_rows_per_chunk(1);
    let mut processor = DatasetProcessor::new(input.to_string_lossy(), Some(output_path.clone()))
        .unwrap()
        .with_config(config)
        .unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.total_rows, 4);

    let df = ParquetReader::new(File::open(&output_path).unwrap())
        .finish()
        .unwrap();
    assert_eq!(df.height(), 4);

    // Rows follow discovery order: 2022 file, then the 2023 files sorted by name
    let station = df.column("STATION").unwrap().str().unwrap();
    let stations: Vec<_> = station.into_iter().collect();
    assert_eq!(
        stations,
        vec![
            Some("03772099999"),
            Some("03772099999"),
            Some("03772099999"),
            Some("99999999999"),
        ]
    );

    // Columns from only one station are null-filled for the others
    let altimeter = df.column("altimeter_setting_hpa").unwrap().f64().unwrap();
    assert_eq!(altimeter.get(0), None);
    assert_eq!(altimeter.get(3), Some(1013.2));
    let wind = df.column("wind_speed_ms").unwrap().f64().unwrap();
    assert_eq!(wind.get(3), None);
}

#[tokio::test]
async fn test_glob_input_selects_subset() {
    let temp_dir = TempDir::new().unwrap();
    let (input, output_path) = create_multi_station_dataset(&temp_dir);
    let pattern = format!("{}/*/0377*.csv", input.display());

    let mut processor = DatasetProcessor::new(pattern, Some(output_path)).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.total_rows, 3);
}
