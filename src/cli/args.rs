//! Command-line argument definitions for the ISD processor
//!
//! Three subcommands: `clean` runs the file pipeline, `decode` decodes a
//! single row given on the command line, and `rules` inspects the rule
//! catalogue.

use crate::config::{CompressionAlgorithm, IsdConfig, OutputFormat, Strictness};
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the ISD Global Hourly processor
#[derive(Debug, Clone, Parser)]
#[command(
    name = "isd_processor",
    version,
    about = "Decode and quality-check NOAA ISD Global Hourly observations",
    long_about = "Decodes the comma-delimited payloads of NOAA Integrated Surface Database \
                  Global Hourly CSV files into typed, scaled columns. Every metric part gets a \
                  QC triplet (pass, status, reason) so downstream tools can tell a missing \
                  observation from a rejected one. Output is written as Parquet or CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Clean Global Hourly CSV files into a single Parquet or CSV file
    Clean(CleanArgs),
    /// Decode one observation row given as COLUMN=VALUE pairs and print it as JSON
    Decode(DecodeArgs),
    /// List recognised identifiers or describe one identifier's rules
    Rules(RulesArgs),
}

/// Arguments for the clean command
#[derive(Debug, Clone, Parser)]
pub struct CleanArgs {
    /// Input CSV file, directory of CSV files, or glob pattern
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Output file path
    ///
    /// Defaults to `<input>_clean.parquet` beside the input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON configuration file; command-line flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Gate strictness
    #[arg(long, value_enum)]
    pub strictness: Option<Strictness>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Parquet compression algorithm
    #[arg(long, value_enum)]
    pub compression: Option<CompressionAlgorithm>,

    /// Worker threads used for row decoding
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Rows per decode task
    #[arg(long)]
    pub rows_per_chunk: Option<usize>,

    /// Maximum number of files decoded concurrently
    #[arg(long)]
    pub max_concurrent_files: Option<usize>,

    /// Drop columns that are neither control columns nor recognised identifiers
    #[arg(long)]
    pub drop_raw_columns: bool,

    /// Do not split REM and QNN into structured sub-columns
    #[arg(long)]
    pub no_remarks: bool,
}

impl CleanArgs {
    /// Layer command-line overrides on top of the configuration file or defaults
    pub fn to_config(&self) -> Result<IsdConfig> {
        let mut config = match &self.config {
            Some(path) => IsdConfig::from_json_file(path)?,
            None => IsdConfig::default(),
        };

        if let Some(strictness) = self.strictness {
            config = config.with_strictness(strictness);
        }
        if let Some(format) = self.format {
            config = config.with_output_format(format);
        }
        if let Some(compression) = self.compression {
            config = config.with_compression(compression);
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(rows) = self.rows_per_chunk {
            config = config.with_rows_per_chunk(rows);
        }
        if let Some(max_files) = self.max_concurrent_files {
            config = config.with_max_concurrent_files(max_files);
        }
        if self.drop_raw_columns {
            config = config.without_raw_columns();
        }
        if self.no_remarks {
            config = config.without_remarks();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the decode command
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Cells of the row, e.g. `TMP=+0250,1 WND=180,1,N,0050,1`
    #[arg(value_name = "COLUMN=VALUE", required = true, value_parser = parse_cell)]
    pub cells: Vec<(String, String)>,

    /// Gate strictness
    #[arg(long, value_enum, default_value_t = Strictness::Strict)]
    pub strictness: Strictness,

    /// Drop columns that are neither control columns nor recognised identifiers
    #[arg(long)]
    pub drop_raw_columns: bool,
}

/// Arguments for the rules command
#[derive(Debug, Clone, Parser)]
pub struct RulesArgs {
    /// Identifier to describe, e.g. `WND` or `AA1`
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Split a `COLUMN=VALUE` argument at the first `=`
fn parse_cell(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected COLUMN=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_defaults() {
        let args = Args::try_parse_from(["isd_processor", "clean", "data/"]).unwrap();
        let Some(Commands::Clean(clean)) = args.command else {
            panic!("expected clean command");
        };
        assert_eq!(clean.input, "data/");
        assert!(clean.output.is_none());

        let config = clean.to_config().unwrap();
        assert_eq!(config.strictness, Strictness::Strict);
        assert_eq!(config.output_format, OutputFormat::Parquet);
        assert!(config.keep_remarks);
    }

    #[test]
    fn test_clean_overrides() {
        let args = Args::try_parse_from([
            "isd_processor",
            "clean",
            "data/*.csv",
            "-o",
            "out.csv",
            "--strictness",
            "permissive",
            "--format",
            "csv",
            "--compression",
            "zstd",
            "--workers",
            "2",
            "--drop-raw-columns",
            "--no-remarks",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        let Some(Commands::Clean(clean)) = args.command else {
            panic!("expected clean command");
        };

        let config = clean.to_config().unwrap();
        assert_eq!(config.strictness, Strictness::Permissive);
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert_eq!(config.compression, CompressionAlgorithm::Zstd);
        assert_eq!(config.workers, 2);
        assert!(config.drop_raw_columns);
        assert!(!config.keep_remarks);
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("isd.json");
        fs::write(&path, r#"{"strictness": "permissive", "rows_per_chunk": 128}"#).unwrap();

        let args = Args::try_parse_from([
            "isd_processor",
            "clean",
            "data/",
            "--config",
            path.to_str().unwrap(),
            "--strictness",
            "strict",
        ])
        .unwrap();
        let Some(Commands::Clean(clean)) = args.command else {
            panic!("expected clean command");
        };

        let config = clean.to_config().unwrap();
        assert_eq!(config.strictness, Strictness::Strict);
        assert_eq!(config.rows_per_chunk, 128);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let args =
            Args::try_parse_from(["isd_processor", "clean", "data/", "--workers", "0"]).unwrap();
        let Some(Commands::Clean(clean)) = args.command else {
            panic!("expected clean command");
        };
        assert!(clean.to_config().is_err());
    }

    #[test]
    fn test_decode_cells() {
        let args = Args::try_parse_from([
            "isd_processor",
            "decode",
            "TMP=+0250,1",
            "REM=MET011A=B",
            "--strictness",
            "permissive",
        ])
        .unwrap();
        let Some(Commands::Decode(decode)) = args.command else {
            panic!("expected decode command");
        };
        assert_eq!(
            decode.cells,
            vec![
                ("TMP".to_string(), "+0250,1".to_string()),
                ("REM".to_string(), "MET011A=B".to_string()),
            ]
        );
        assert_eq!(decode.strictness, Strictness::Permissive);
    }

    #[test]
    fn test_decode_rejects_bare_values() {
        assert!(Args::try_parse_from(["isd_processor", "decode", "+0250,1"]).is_err());
        assert!(Args::try_parse_from(["isd_processor", "decode"]).is_err());
    }

    #[test]
    fn test_rules_args() {
        let args = Args::try_parse_from(["isd_processor", "rules", "WND", "--json"]).unwrap();
        let Some(Commands::Rules(rules)) = args.command else {
            panic!("expected rules command");
        };
        assert_eq!(rules.identifier.as_deref(), Some("WND"));
        assert!(rules.json);
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["isd_processor"]).unwrap();
        assert!(args.command.is_none());
    }
}
