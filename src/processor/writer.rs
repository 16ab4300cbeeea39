//! Output writing for cleaned observations
//!
//! Decoded frames are stacked with a diagonal concat (files may carry
//! different identifier sets) and written once, as Parquet or CSV.

use super::streaming::stack_frames;
use crate::config::{IsdConfig, OutputFormat};
use crate::error::{IsdError, Result};

use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter, StatisticsOptions};
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::debug;

/// Writes the combined output file
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_path: PathBuf,
    config: IsdConfig,
}

impl OutputWriter {
    pub fn new(output_path: PathBuf, config: IsdConfig) -> Self {
        Self {
            output_path,
            config,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Combine all frames and write them, returning the number of rows written
    pub async fn write_frames(&self, frames: Vec<DataFrame>) -> Result<usize> {
        if frames.is_empty() {
            return Ok(0);
        }
        debug!(
            "Writing {} frames to {}",
            frames.len(),
            self.output_path.display()
        );

        let writer = self.clone();
        task::spawn_blocking(move || -> Result<usize> {
            let mut df = stack_frames(frames)?;
            writer.write_dataframe(&mut df)?;
            Ok(df.height())
        })
        .await
        .map_err(|e| IsdError::ProcessingFailed {
            path: self.output_path.clone(),
            reason: format!("Failed to join writer task: {e}"),
        })?
    }

    /// Write a single frame in the configured format
    pub fn write_dataframe(&self, df: &mut DataFrame) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.output_path)?;

        let written = match self.config.output_format {
            OutputFormat::Parquet => ParquetWriter::new(file)
                .with_compression(self.config.compression.to_polars_compression())
                .with_statistics(StatisticsOptions::full())
                .finish(df)
                .map(|_| ()),
            OutputFormat::Csv => CsvWriter::new(file).include_header(true).finish(df),
        };

        written.map_err(|e| IsdError::ProcessingFailed {
            path: self.output_path.clone(),
            reason: format!("Failed to write {:?} output: {}", self.config.output_format, e),
        })?;

        debug!(
            "Wrote {} rows x {} columns to {}",
            df.height(),
            df.width(),
            self.output_path.display()
        );
        Ok(())
    }
}
