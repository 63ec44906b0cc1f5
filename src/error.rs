//! Error types for the listing pipeline.
//!
//! Only fatal conditions are represented here. Malformed cell values never
//! surface as errors: they degrade to a null in that cell and are counted
//! by the normalizer instead.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input file extension is not a supported tabular format.
    #[error("Unsupported file format: '{0}'. Supported formats: csv")]
    UnsupportedFormat(String),

    /// One or more required source columns are absent from the export.
    ///
    /// This indicates the upstream export format changed.
    #[error("Missing required column(s): {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Polars failed to read or reshape the table.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used at stage boundaries.
pub type Result<T> = std::result::Result<T, PipelineError>;
