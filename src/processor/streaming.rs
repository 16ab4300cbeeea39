//! Streaming processing module for Global Hourly files
//!
//! Files are decoded concurrently. Inside a file, rows are split into chunks
//! that are decoded on the blocking pool and reassembled in input order, so
//! every output frame keeps the row order of its source file.

use crate::catalogue::RuleCatalogue;
use crate::config::IsdConfig;
use crate::decoder::{RawRow, RowDecoder};
use crate::error::{IsdError, Result};
use crate::models::{ProcessingStats, QcSummary};
use crate::schema::RowSchema;

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, error, warn};

/// Decoded content of one file or chunk
#[derive(Debug)]
pub struct DecodedFrame {
    pub frame: DataFrame,
    pub rows: usize,
    pub rows_with_usable_metric: usize,
    pub qc_summary: QcSummary,
}

/// Streaming processor for Global Hourly files
#[derive(Debug, Clone)]
pub struct StreamingProcessor {
    config: IsdConfig,
    catalogue: &'static RuleCatalogue,
}

impl StreamingProcessor {
    /// Create a processor decoding against the standard catalogue
    pub fn new(config: IsdConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalogue: RuleCatalogue::global()?,
        })
    }

    pub fn config(&self) -> &IsdConfig {
        &self.config
    }

    /// Decode every file, returning one frame per non-empty file
    pub async fn process_files(
        &self,
        files: &[PathBuf],
        output_path: &Path,
    ) -> Result<(Vec<DataFrame>, ProcessingStats)> {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Decoding files");

        let concurrent_limit = self.config.max_concurrent_files.min(files.len()).max(1);
        debug!(
            "Decoding {} files with up to {} in flight",
            files.len(),
            concurrent_limit
        );

        let stats = ProcessingStats {
            output_path: output_path.to_path_buf(),
            ..Default::default()
        };

        let (mut decoded, stats) = stream::iter(files.iter().enumerate())
            .map(|(index, file_path)| {
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = file_path.file_name() {
                        pb.set_message(format!("Decoding: {}", file_name.to_string_lossy()));
                    }
                    let result = self.process_single_file(file_path).await;
                    pb.inc(1);

                    match &result {
                        Ok(Some(file)) => {
                            debug!("Decoded {} rows from {}", file.rows, file_path.display())
                        }
                        Ok(None) => warn!("Skipped file (no rows): {}", file_path.display()),
                        Err(e) => error!("Failed to process {}: {:#}", file_path.display(), e),
                    }
                    (index, result)
                }
            })
            .buffer_unordered(concurrent_limit)
            .fold(
                (Vec::new(), stats),
                |(mut frames, mut stats), (index, result)| async move {
                    match result {
                        Ok(Some(file)) => {
                            stats.files_processed += 1;
                            stats.total_rows += file.rows;
                            stats.rows_with_usable_metric += file.rows_with_usable_metric;
                            stats.qc_summary.merge(file.qc_summary);
                            frames.push((index, file.frame));
                        }
                        Ok(None) => stats.files_processed += 1,
                        Err(_) => stats.files_failed += 1,
                    }
                    (frames, stats)
                },
            )
            .await;

        pb.finish_with_message("All files decoded");

        // Completion order is arbitrary; output follows discovery order
        decoded.sort_by_key(|(index, _)| *index);
        let frames = decoded.into_iter().map(|(_, frame)| frame).collect();
        Ok((frames, stats))
    }

    /// Read and decode one file. `None` when the file has no data rows.
    pub async fn process_single_file(&self, file_path: &Path) -> Result<Option<DecodedFrame>> {
        debug!("Reading observations from {}", file_path.display());

        let rows = task::spawn_blocking({
            let file_path = file_path.to_owned();
            move || read_raw_rows(&file_path)
        })
        .await
        .map_err(|e| IsdError::ProcessingFailed {
            path: file_path.to_path_buf(),
            reason: format!("Failed to join reader task: {e}"),
        })??;

        if rows.is_empty() {
            return Ok(None);
        }

        let chunks = split_into_chunks(rows, self.config.rows_per_chunk);
        debug!(
            "Decoding {} in {} chunks",
            file_path.display(),
            chunks.len()
        );

        let catalogue = self.catalogue;
        let decoded: Vec<Result<DecodedFrame>> = stream::iter(chunks)
            .map(|chunk| {
                let config = self.config.clone();
                async move {
                    task::spawn_blocking(move || decode_chunk(catalogue, &config, chunk)).await
                }
            })
            .buffered(self.config.workers)
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(IsdError::ProcessingFailed {
                    path: file_path.to_path_buf(),
                    reason: format!("Failed to join decode task: {e}"),
                }),
            })
            .collect()
            .await;

        let mut parts = Vec::with_capacity(decoded.len());
        for chunk in decoded {
            parts.push(chunk?);
        }
        combine_chunks(parts).map(Some)
    }
}

/// Read a CSV file with every column as text and collect its non-null cells
pub fn read_raw_rows(path: &Path) -> Result<Vec<RawRow>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .map_err(|e| IsdError::ProcessingFailed {
            path: path.to_path_buf(),
            reason: format!("Failed to read CSV: {e}"),
        })?;

    let columns = df
        .get_columns()
        .iter()
        .map(|column| Ok((column.name().to_string(), column.str()?)))
        .collect::<PolarsResult<Vec<_>>>()?;

    let rows = (0..df.height())
        .map(|index| {
            columns
                .iter()
                .filter_map(|(name, cells)| {
                    cells.get(index).map(|cell| (name.clone(), cell.to_string()))
                })
                .collect::<RawRow>()
        })
        .collect();
    Ok(rows)
}

fn split_into_chunks(rows: Vec<RawRow>, rows_per_chunk: usize) -> Vec<Vec<RawRow>> {
    let size = rows_per_chunk.max(1);
    let mut chunks = Vec::with_capacity(rows.len().div_ceil(size));
    let mut rows = rows.into_iter().peekable();
    while rows.peek().is_some() {
        chunks.push(rows.by_ref().take(size).collect());
    }
    chunks
}

/// Decode a chunk of raw rows into a typed frame plus its QC tallies
pub fn decode_chunk(
    catalogue: &RuleCatalogue,
    config: &IsdConfig,
    chunk: Vec<RawRow>,
) -> Result<DecodedFrame> {
    let decoder = RowDecoder::from_config(catalogue, config);
    let rows: Vec<_> = decoder.decode_rows(chunk).collect();

    let mut qc_summary = QcSummary::default();
    let mut rows_with_usable_metric = 0;
    for row in &rows {
        qc_summary.record(row);
        if row
            .metrics()
            .is_some_and(|metrics| metrics.row_has_any_usable_metric)
        {
            rows_with_usable_metric += 1;
        }
    }

    Ok(DecodedFrame {
        frame: RowSchema::new(catalogue).to_dataframe(&rows)?,
        rows: rows.len(),
        rows_with_usable_metric,
        qc_summary,
    })
}

/// Stack chunk frames, tolerating columns present in only some chunks
fn combine_chunks(parts: Vec<DecodedFrame>) -> Result<DecodedFrame> {
    let mut rows = 0;
    let mut rows_with_usable_metric = 0;
    let mut qc_summary = QcSummary::default();
    let mut frames = Vec::with_capacity(parts.len());
    for part in parts {
        rows += part.rows;
        rows_with_usable_metric += part.rows_with_usable_metric;
        qc_summary.merge(part.qc_summary);
        frames.push(part.frame);
    }

    Ok(DecodedFrame {
        frame: stack_frames(frames)?,
        rows,
        rows_with_usable_metric,
        qc_summary,
    })
}

/// Diagonal concatenation of frames in order
pub fn stack_frames(mut frames: Vec<DataFrame>) -> Result<DataFrame> {
    match frames.len() {
        0 => Ok(DataFrame::empty()),
        1 => Ok(frames.remove(0)),
        _ => {
            let lazy: Vec<LazyFrame> = frames.into_iter().map(DataFrame::lazy).collect();
            Ok(concat_lf_diagonal(lazy, UnionArgs::default())?.collect()?)
        }
    }
}
