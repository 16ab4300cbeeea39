//! Configuration management and validation.
//!
//! Provides the strictness policy threaded through every decoder gate, plus
//! the processing and output parameters used by the file pipeline.

use crate::constants::{DEFAULT_MAX_CONCURRENT_FILES, DEFAULT_ROWS_PER_CHUNK};
use crate::error::{IsdError, Result};
use clap::ValueEnum;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Validation strictness applied by the decoder
///
/// Strict mode enables the token-width gate and logs unknown identifiers,
/// arity and width violations. Permissive mode skips the width gate and logs
/// nothing. Both modes enforce the semantic gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    #[default]
    Strict,
    Permissive,
}

impl Strictness {
    pub fn is_strict(self) -> bool {
        matches!(self, Strictness::Strict)
    }
}

/// Output file format for cleaned rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Global configuration for ISD processing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IsdConfig {
    /// Gate strictness for every decoded row
    pub strictness: Strictness,

    /// Number of worker threads used for row decoding
    pub workers: usize,

    /// Rows handed to a single blocking decode task
    pub rows_per_chunk: usize,

    /// Maximum number of files decoded concurrently
    pub max_concurrent_files: usize,

    /// Output file format
    pub output_format: OutputFormat,

    /// Parquet compression algorithm
    pub compression: CompressionAlgorithm,

    /// Drop columns that are neither control columns nor recognised identifiers
    pub drop_raw_columns: bool,

    /// Emit structured remark and QNN sub-columns
    pub keep_remarks: bool,
}

impl Default for IsdConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::Strict,
            workers: num_cpus::get(),
            rows_per_chunk: DEFAULT_ROWS_PER_CHUNK,
            max_concurrent_files: DEFAULT_MAX_CONCURRENT_FILES,
            output_format: OutputFormat::Parquet,
            compression: CompressionAlgorithm::Snappy,
            drop_raw_columns: false,
            keep_remarks: true,
        }
    }
}

impl IsdConfig {
    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: IsdConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(IsdError::configuration("workers must be at least 1"));
        }
        if self.rows_per_chunk == 0 {
            return Err(IsdError::configuration("rows_per_chunk must be at least 1"));
        }
        if self.max_concurrent_files == 0 {
            return Err(IsdError::configuration(
                "max_concurrent_files must be at least 1",
            ));
        }
        Ok(())
    }

    /// Set the strictness policy
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the rows decoded per blocking task
    pub fn with_rows_per_chunk(mut self, rows: usize) -> Self {
        self.rows_per_chunk = rows;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Set the output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set parquet compression
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Drop unrecognised raw columns from the output
    pub fn without_raw_columns(mut self) -> Self {
        self.drop_raw_columns = true;
        self
    }

    /// Skip REM and QNN sub-column extraction
    pub fn without_remarks(mut self) -> Self {
        self.keep_remarks = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = IsdConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.strictness, Strictness::Strict);
        assert_eq!(config.rows_per_chunk, DEFAULT_ROWS_PER_CHUNK);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = IsdConfig::default().with_workers(0);
        assert!(matches!(
            config.validate(),
            Err(IsdError::Configuration { .. })
        ));
    }

    #[test]
    fn test_builder_setters() {
        let config = IsdConfig::default()
            .with_strictness(Strictness::Permissive)
            .with_rows_per_chunk(10)
            .with_output_format(OutputFormat::Csv)
            .without_raw_columns()
            .without_remarks();

        assert!(!config.strictness.is_strict());
        assert_eq!(config.rows_per_chunk, 10);
        assert_eq!(config.output_format.extension(), "csv");
        assert!(config.drop_raw_columns);
        assert!(!config.keep_remarks);
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"strictness": "permissive", "workers": 2}}"#).unwrap();

        let config = IsdConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.strictness, Strictness::Permissive);
        assert_eq!(config.workers, 2);
        assert_eq!(config.max_concurrent_files, DEFAULT_MAX_CONCURRENT_FILES);
    }

    #[test]
    fn test_compression_mapping() {
        assert!(matches!(
            CompressionAlgorithm::Zstd.to_polars_compression(),
            ParquetCompression::Zstd(None)
        ));
    }
}
