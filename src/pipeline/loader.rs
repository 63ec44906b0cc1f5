//! Dataset loader for listing exports

use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::error::{PipelineError, Result};

/// Load the whole export into memory with every column read as `String`.
///
/// Schema inference is disabled so that currency, percent and date cells
/// reach the normalizer untouched.
pub fn load_listings(path: &Path) -> Result<DataFrame> {
    let lf = scan_csv(path)?;
    let df = lf.collect()?;
    info!(
        rows = df.height(),
        columns = df.width(),
        "loaded {}",
        path.display()
    );
    Ok(df)
}

/// Read only the header of the export.
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = scan_csv(path)?.collect_schema()?;
    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Shape and estimated memory of a loaded table: (rows, columns, MB)
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}

fn scan_csv(path: &Path) -> Result<LazyFrame> {
    if !path.exists() {
        return Err(PipelineError::InputNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "csv" {
        return Err(PipelineError::UnsupportedFormat(extension));
    }

    let lf = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?;

    Ok(lf)
}
