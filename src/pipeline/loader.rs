//! Dataset loader for comma-separated files

use std::path::Path;

use polars::prelude::*;

use crate::error::{OncoError, Result};

/// Default number of rows used for CSV schema inference
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10_000;

/// Binary table formats that are never read as comma-separated text
const BINARY_TABLE_EXTENSIONS: [&str; 6] =
    ["parquet", "sas7bdat", "xlsx", "xls", "feather", "arrow"];

/// Load a comma-separated file (header row required) into a DataFrame.
///
/// Any extension is accepted except known binary table formats.
///
/// # Arguments
/// * `path` - Path to comma-separated text
/// * `infer_schema_length` - Rows used for dtype inference; `0` scans the whole file
///
/// # Errors
/// `OncoError::Io` when the file is missing, is a binary table format,
/// or cannot be parsed as a table.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if BINARY_TABLE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(OncoError::io(
            path,
            format!(
                "Unsupported file format: '{}'. Expected comma-separated text",
                extension
            ),
        ));
    }

    if !path.is_file() {
        return Err(OncoError::io(path, "file does not exist or is not readable"));
    }

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| OncoError::io(path, format!("Failed to parse CSV: {}", e)))?;

    if df.width() == 0 {
        return Err(OncoError::io(path, "CSV file has no columns"));
    }

    log::debug!(
        "loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Ok(df)
}

/// Rows, columns and estimated in-memory size (MB) of a loaded dataset
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}
