//! File pipeline for Global Hourly observations.
//!
//! Orchestrates the complete cleaning workflow using specialized modules for
//! file discovery, streaming decode, and output writing.

pub mod discovery;
pub mod streaming;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::FileDiscovery, streaming::StreamingProcessor, writer::OutputWriter};

use crate::config::IsdConfig;
use crate::error::Result;
use crate::models::ProcessingStats;

use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main processor for cleaning a set of Global Hourly files
#[derive(Debug)]
pub struct DatasetProcessor {
    input: String,
    output_path: PathBuf,
    explicit_output: bool,
    config: IsdConfig,
    file_discovery: FileDiscovery,
    streaming_processor: StreamingProcessor,
    output_writer: OutputWriter,
}

impl DatasetProcessor {
    /// Create a processor for a file, directory or glob pattern.
    ///
    /// Without an explicit output path the result is written next to the
    /// input as `<name>_clean.<ext>`.
    pub fn new(input: impl Into<String>, output_path: Option<PathBuf>) -> Result<Self> {
        let input = input.into();
        let config = IsdConfig::default();
        let explicit_output = output_path.is_some();
        let output_path = output_path
            .unwrap_or_else(|| default_output_path(&input, config.output_format.extension()));

        Ok(Self {
            file_discovery: FileDiscovery::new(input.clone()),
            streaming_processor: StreamingProcessor::new(config.clone())?,
            output_writer: OutputWriter::new(output_path.clone(), config.clone()),
            input,
            output_path,
            explicit_output,
            config,
        })
    }

    /// Configure the processor. A derived output path follows the new
    /// output format's extension.
    pub fn with_config(mut self, config: IsdConfig) -> Result<Self> {
        if !self.explicit_output {
            self.output_path = default_output_path(&self.input, config.output_format.extension());
        }
        self.streaming_processor = StreamingProcessor::new(config.clone())?;
        self.output_writer = OutputWriter::new(self.output_path.clone(), config.clone());
        self.config = config;
        Ok(self)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Main processing entry point
    pub async fn process(&mut self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        println!(
            "{}",
            "Starting ISD Global Hourly cleaning".bright_green().bold()
        );
        println!("  {} {}", "Input:".bright_cyan(), self.input);
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.output_path.display()
        );
        println!(
            "  {} {:?}",
            "Strictness:".bright_cyan(),
            self.config.strictness
        );

        // Step 1: Discover CSV files
        println!("\n{}", "Discovering CSV files...".bright_yellow());
        let csv_files = self.file_discovery.discover_csv_files()?;
        println!(
            "  {} {} CSV files from {} stations",
            "Found".bright_green(),
            csv_files.len().to_string().bright_white().bold(),
            self.file_discovery
                .station_count()
                .to_string()
                .bright_white()
                .bold()
        );

        if csv_files.is_empty() {
            return Ok(ProcessingStats {
                output_path: self.output_path.clone(),
                processing_time_ms: start_time.elapsed().as_millis(),
                ..Default::default()
            });
        }

        // Step 2: Decode files
        println!("\n{}", "Decoding observations...".bright_yellow());
        let (frames, mut stats) = self
            .streaming_processor
            .process_files(&csv_files, &self.output_path)
            .await?;

        // Step 3: Write output
        if !frames.is_empty() {
            stats.total_rows = self.output_writer.write_frames(frames).await?;
        }

        let total_time = start_time.elapsed().as_millis();
        print_summary(&stats, total_time);

        Ok(ProcessingStats {
            processing_time_ms: total_time,
            ..stats
        })
    }
}

/// `<input stem>_clean.<ext>` beside the input; `isd_clean.<ext>` for globs
pub fn default_output_path(input: &str, extension: &str) -> PathBuf {
    let path = Path::new(input);
    if path.is_file() || path.is_dir() {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "isd".to_string());
        path.parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!("{stem}_clean.{extension}"))
    } else {
        PathBuf::from(format!("isd_clean.{extension}"))
    }
}

fn print_summary(stats: &ProcessingStats, total_time: u128) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        total_time.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Total rows:".bright_cyan(),
        stats.total_rows.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Rows with a usable metric:".bright_cyan(),
        stats.rows_with_usable_metric.to_string().bright_white()
    );

    let qc = &stats.qc_summary;
    println!(
        "  {} {}/{}",
        "QC signals passed:".bright_cyan(),
        qc.passed.to_string().bright_white(),
        qc.signals
    );
    for (reason, count) in &qc.failures {
        println!(
            "    {} {}",
            format!("{}:", reason.as_str()).yellow(),
            count
        );
    }
}
