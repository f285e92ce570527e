//! Dataset cleaning: index-artifact columns and rows with missing values

use polars::prelude::*;

use crate::error::{OncoError, Result};

/// Header prefix pandas gives to columns written without a name (`Unnamed: 0`, `Unnamed: 32`)
pub const UNNAMED_PREFIX: &str = "unnamed";

/// Result of cleaning a raw dataset
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    /// Cleaned frame: no artifact columns, no missing values
    pub frame: DataFrame,
    /// Columns removed, in their original order
    pub dropped_columns: Vec<String>,
    /// Number of rows removed because they held a missing value
    pub dropped_rows: usize,
}

/// Returns true for column names that are export artifacts rather than measurements.
///
/// Matches empty headers and names starting with `Unnamed` (any case).
pub fn is_index_artifact(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.is_empty() || trimmed.to_lowercase().starts_with(UNNAMED_PREFIX)
}

/// Clean a raw dataset.
///
/// Drops artifact columns plus any caller-named `extra_drops` (absent names are
/// ignored), then drops every row holding a null, or a NaN in a float column.
/// Missing values are never imputed.
///
/// # Errors
/// `OncoError::Validation` when the input has no data rows, or when no
/// columns or no rows survive.
pub fn clean_dataset(df: &DataFrame, extra_drops: &[String]) -> Result<CleanedDataset> {
    if df.height() == 0 {
        return Err(OncoError::validation("Dataset has a header but no data rows"));
    }

    let dropped_columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| is_index_artifact(name) || extra_drops.contains(name))
        .collect();

    let frame = df.drop_many(&dropped_columns);
    if frame.width() == 0 {
        return Err(OncoError::validation(
            "Cleaning removed every column; no features remain",
        ));
    }

    let keep = complete_row_mask(&frame)?;
    let dropped_rows = keep.iter().filter(|k| !**k).count();
    let frame = if dropped_rows > 0 {
        frame.filter(&BooleanChunked::from_slice("keep".into(), &keep))?
    } else {
        frame
    };

    if frame.height() == 0 {
        return Err(OncoError::validation(
            "Cleaning removed every row; each row contains a missing value",
        ));
    }

    if dropped_rows > 0 {
        log::warn!("dropped {} row(s) with missing values", dropped_rows);
    }
    if !dropped_columns.is_empty() {
        log::info!("dropped column(s): {:?}", dropped_columns);
    }

    Ok(CleanedDataset {
        frame,
        dropped_columns,
        dropped_rows,
    })
}

/// One flag per row: true when every cell is present (and not NaN for floats)
fn complete_row_mask(df: &DataFrame) -> Result<Vec<bool>> {
    let mut keep = vec![true; df.height()];

    for column in df.get_columns() {
        if column.dtype().is_float() {
            let cast = column.cast(&DataType::Float64)?;
            for (slot, value) in keep.iter_mut().zip(cast.f64()?.iter()) {
                if !matches!(value, Some(v) if !v.is_nan()) {
                    *slot = false;
                }
            }
        } else if column.null_count() > 0 {
            let nulls = column.as_materialized_series().is_null();
            for (slot, is_null) in keep.iter_mut().zip(nulls.iter()) {
                if is_null.unwrap_or(true) {
                    *slot = false;
                }
            }
        }
    }

    Ok(keep)
}
