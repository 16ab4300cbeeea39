//! ISD Global Hourly Processor Library
//!
//! Decodes NOAA Integrated Surface Database Global Hourly observations into
//! typed, quality-checked columns.
//!
//! This library provides tools for:
//! - A declarative rule catalogue covering the mandatory and additional-data
//!   identifiers, with friendly output names
//! - A per-part decoder that runs width, quality, sentinel, numeric, range and
//!   domain gates and attaches a QC triplet to every metric part
//! - A row engine that normalises control columns, splits remarks, and computes
//!   row usability metrics
//! - A concurrent file pipeline writing Parquet or CSV output
//!
//! ```no_run
//! use isd_processor::{Strictness, decode_row};
//! use std::collections::BTreeMap;
//!
//! let row = BTreeMap::from([("TMP", "+0250,1"), ("WND", "180,1,N,0050,1")]);
//! let clean = decode_row(&row, Strictness::Strict)?;
//! assert_eq!(clean.number("temperature_c"), Some(25.0));
//! # Ok::<(), isd_processor::IsdError>(())
//! ```

pub mod catalogue;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod models;
pub mod processor;
pub mod schema;

pub use catalogue::RuleCatalogue;
pub use config::{IsdConfig, Strictness};
pub use decoder::{FieldAssembler, RowDecoder, decode_row, decode_rows};
pub use error::{IsdError, Result};
pub use models::{CleanRow, QcReason, QcSignal, QcStatus, Value};
pub use processor::DatasetProcessor;
