//! Attribution matrix input shapes and normalization
//!
//! Tree explainers return either one matrix or, for two-class models, one
//! matrix per class. Both shapes are modeled explicitly by [`Attribution`].

use std::path::Path;

use faer::Mat;
use polars::prelude::*;

use crate::error::{OncoError, Result};

/// Attribution scores as produced by an external explainer.
///
/// Rows are samples and columns are features, in the feature matrix's order.
#[derive(Debug, Clone)]
pub enum Attribution {
    /// A single matrix (regression-style or positive-class output)
    SingleClass(Mat<f64>),
    /// One matrix per class; the positive (second) class is used
    TwoClass { negative: Mat<f64>, positive: Mat<f64> },
}

impl Attribution {
    /// Build from a list of matrices: one is single-class, two is two-class.
    ///
    /// # Errors
    /// `OncoError::Validation` for any other count.
    pub fn from_matrices(matrices: Vec<Mat<f64>>) -> Result<Self> {
        let count = matrices.len();
        let mut iter = matrices.into_iter();
        match (iter.next(), iter.next(), count) {
            (Some(single), None, 1) => Ok(Attribution::SingleClass(single)),
            (Some(negative), Some(positive), 2) => Ok(Attribution::TwoClass { negative, positive }),
            _ => Err(OncoError::validation(format!(
                "Expected one attribution matrix or a pair (one per class), got {}",
                count
            ))),
        }
    }

    /// Number of samples in the matrix that will be aggregated
    pub fn n_samples(&self) -> usize {
        match self {
            Attribution::SingleClass(m) => m.nrows(),
            Attribution::TwoClass { positive, .. } => positive.nrows(),
        }
    }
}

/// Resolve `raw` to the matrix to aggregate and check it against the feature count.
///
/// # Errors
/// `OncoError::Validation` when the column count differs from `n_features`,
/// the matrix is empty, the two class matrices differ in shape, or a value
/// is not finite.
pub fn normalize_attribution(raw: Attribution, n_features: usize) -> Result<Mat<f64>> {
    let matrix = match raw {
        Attribution::SingleClass(matrix) => matrix,
        Attribution::TwoClass { negative, positive } => {
            if negative.nrows() != positive.nrows() || negative.ncols() != positive.ncols() {
                return Err(OncoError::validation(format!(
                    "Class attribution matrices differ in shape: {}x{} vs {}x{}",
                    negative.nrows(),
                    negative.ncols(),
                    positive.nrows(),
                    positive.ncols()
                )));
            }
            positive
        }
    };

    if matrix.ncols() != n_features {
        return Err(OncoError::validation(format!(
            "Attribution matrix has {} columns but the feature matrix has {}",
            matrix.ncols(),
            n_features
        )));
    }
    if matrix.nrows() == 0 {
        return Err(OncoError::validation("Attribution matrix has no rows"));
    }

    for j in 0..matrix.ncols() {
        for i in 0..matrix.nrows() {
            if !matrix[(i, j)].is_finite() {
                return Err(OncoError::validation(format!(
                    "Attribution value at row {}, column {} is not finite",
                    i, j
                )));
            }
        }
    }

    Ok(matrix)
}

/// Build a matrix from row vectors.
///
/// # Errors
/// `OncoError::Validation` if the rows have different lengths.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Mat<f64>> {
    let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(OncoError::validation(format!(
            "Attribution row {} has {} values, expected {}",
            index,
            row.len(),
            ncols
        )));
    }
    Ok(Mat::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}

/// Read an attribution matrix from a CSV file with a header row.
///
/// Returns the header names alongside the matrix.
pub fn read_attribution_csv(path: &Path) -> Result<(Vec<String>, Mat<f64>)> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| OncoError::io(path, format!("Failed to parse attribution CSV: {}", e)))?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        if !column.dtype().is_primitive_numeric() {
            return Err(OncoError::validation(format!(
                "Attribution column '{}' in {} is not numeric",
                column.name(),
                path.display()
            )));
        }
        let cast = column.cast(&DataType::Float64)?;
        columns.push(cast.f64()?.iter().map(|v| v.unwrap_or(f64::NAN)).collect());
    }

    let matrix = Mat::from_fn(df.height(), columns.len(), |i, j| columns[j][i]);
    Ok((names, matrix))
}
