//! Numeric feature matrix with a stable column order

use faer::Mat;
use polars::prelude::*;

use crate::error::{OncoError, Result};

/// Feature matrix (X): every column is `Float64`, column order is canonical.
///
/// The column order is the ordering attribution matrices must follow.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    frame: DataFrame,
}

impl FeatureMatrix {
    /// Build from a frame of numeric columns, casting each to `Float64`.
    ///
    /// # Errors
    /// `OncoError::Validation` if the frame has no columns or a column is not numeric.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        if df.width() == 0 {
            return Err(OncoError::validation("Feature matrix has no columns"));
        }

        let mut columns = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            if !column.dtype().is_primitive_numeric() {
                return Err(OncoError::validation(format!(
                    "Feature column '{}' is not numeric (dtype {})",
                    column.name(),
                    column.dtype()
                )));
            }
            columns.push(column.cast(&DataType::Float64)?);
        }

        Ok(Self {
            frame: DataFrame::new(columns)?,
        })
    }

    /// Build from named column vectors (all the same length).
    pub fn from_columns(names: &[String], values: Vec<Vec<f64>>) -> Result<Self> {
        if names.len() != values.len() {
            return Err(OncoError::validation(format!(
                "{} column names supplied for {} columns",
                names.len(),
                values.len()
            )));
        }
        let columns: Vec<Column> = names
            .iter()
            .zip(values)
            .map(|(name, col)| Column::new(name.as_str().into(), col))
            .collect();
        let frame = DataFrame::new(columns)?;
        Self::from_frame(&frame)
    }

    /// Underlying `Float64` frame
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consume into the underlying frame
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn n_rows(&self) -> usize {
        self.frame.height()
    }

    pub fn n_features(&self) -> usize {
        self.frame.width()
    }

    /// Column names in canonical order
    pub fn feature_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Values of the column at `index`; missing cells read as NaN.
    pub fn column_values(&self, index: usize) -> Vec<f64> {
        self.frame.get_columns()[index]
            .f64()
            .map(|ca| ca.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
            .unwrap_or_default()
    }

    /// Rows at `indices`, in the given order
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        let idx = row_index(indices);
        Ok(Self {
            frame: self.frame.take(&idx)?,
        })
    }

    /// Dense copy as a faer matrix (rows = samples, columns = features)
    pub fn to_mat(&self) -> Mat<f64> {
        let columns: Vec<Vec<f64>> = (0..self.n_features())
            .map(|j| self.column_values(j))
            .collect();
        Mat::from_fn(self.n_rows(), self.n_features(), |i, j| columns[j][i])
    }
}

/// Polars row index for a take
pub(crate) fn row_index(indices: &[usize]) -> IdxCa {
    IdxCa::from_vec(
        "row_index".into(),
        indices.iter().map(|&i| i as IdxSize).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frame_casts_integers() {
        let df = df! {
            "radius_mean" => [10i64, 12, 14],
            "area_mean" => [500.0f64, 600.0, 700.0],
        }
        .unwrap();

        let x = FeatureMatrix::from_frame(&df).unwrap();
        assert_eq!(x.n_rows(), 3);
        assert_eq!(x.feature_names(), vec!["radius_mean", "area_mean"]);
        assert_eq!(x.column_values(0), vec![10.0, 12.0, 14.0]);
    }

    #[test]
    fn test_from_frame_rejects_strings() {
        let df = df! {
            "radius_mean" => [10.0f64, 12.0],
            "note" => ["a", "b"],
        }
        .unwrap();

        let err = FeatureMatrix::from_frame(&df).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("note"));
    }

    #[test]
    fn test_take_rows_preserves_columns() {
        let x = FeatureMatrix::from_columns(
            &["a".to_string(), "b".to_string()],
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        )
        .unwrap();

        let subset = x.take_rows(&[2, 0]).unwrap();
        assert_eq!(subset.column_values(0), vec![3.0, 1.0]);
        assert_eq!(subset.column_values(1), vec![6.0, 4.0]);
        assert_eq!(subset.feature_names(), x.feature_names());
    }

    #[test]
    fn test_to_mat_layout() {
        let x = FeatureMatrix::from_columns(
            &["a".to_string(), "b".to_string()],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        )
        .unwrap();

        let m = x.to_mat();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 2);
        assert_eq!(m[(0, 1)], 3.0);
        assert_eq!(m[(1, 0)], 2.0);
    }
}
