//! Error handling for ISD decoding operations.
//!
//! Bad observation data never surfaces here: every malformed cell becomes a
//! QC signal on the decoded row. These errors cover catalogue misuse, file
//! handling and output conversion failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IsdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern in rule catalogue: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid catalogue entry for {identifier}: {reason}")]
    CatalogueInvalid { identifier: String, reason: String },
}

impl IsdError {
    /// Create a catalogue error for the given identifier
    pub fn catalogue(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CatalogueInvalid {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IsdError>;
