//! File discovery for Global Hourly observation files
//!
//! An input may be a single CSV file, a directory (walked recursively), or a
//! glob pattern. Global Hourly files are named after their station
//! (`<USAF><WBAN>.csv`), often grouped in per-year directories:
//!
//! ```text
//! global-hourly/
//!   2022/
//!     03772099999.csv
//!     72503014732.csv
//!   2023/
//!     03772099999.csv
//! ```

use crate::constants::OBSERVATION_FILE_EXTENSION;
use crate::error::{IsdError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File discovery component for observation inputs
#[derive(Debug)]
pub struct FileDiscovery {
    input: String,
    station_count: usize,
}

impl FileDiscovery {
    /// Create a discovery for a path or glob pattern
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            station_count: 0,
        }
    }

    /// Number of distinct stations (file stems) found by the last discovery
    pub fn station_count(&self) -> usize {
        self.station_count
    }

    /// Resolve the input to a sorted list of CSV files
    pub fn discover_csv_files(&mut self) -> Result<Vec<PathBuf>> {
        let path = Path::new(&self.input);
        let mut files = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            walk_directory(path)?
        } else if is_glob_pattern(&self.input) {
            expand_glob(&self.input)?
        } else {
            return Err(IsdError::InputNotFound {
                path: path.to_path_buf(),
            });
        };
        files.sort();

        let stations: HashSet<&str> = files
            .iter()
            .filter_map(|file| file.file_stem().and_then(|stem| stem.to_str()))
            .collect();
        self.station_count = stations.len();

        debug!(
            "Found {} CSV files from {} stations in {}",
            files.len(),
            self.station_count,
            self.input
        );
        Ok(files)
    }
}

fn walk_directory(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| IsdError::ProcessingFailed {
            path: root.to_path_buf(),
            reason: format!("Failed to walk directory: {e}"),
        })?;
        if entry.file_type().is_file() && is_csv_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| IsdError::Configuration {
        message: format!("Invalid glob pattern '{pattern}': {e}"),
    })?;
    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() && is_csv_file(&path) => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable path: {}", e),
        }
    }
    Ok(files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Check if a path is an observation CSV file
fn is_csv_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == OBSERVATION_FILE_EXTENSION)
}
