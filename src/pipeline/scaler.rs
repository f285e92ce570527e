//! Leak-free standard scaling
//!
//! Statistics are fitted on the training subset only and then applied
//! unchanged to every matrix passed to [`ScalerState::transform`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::features::FeatureMatrix;
use crate::error::{OncoError, Result};

/// How to treat a column whose training-subset variance is zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroVariancePolicy {
    /// Center the column and divide by 1.0
    #[default]
    Unit,
    /// Fail with a validation error
    Reject,
}

impl fmt::Display for ZeroVariancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroVariancePolicy::Unit => write!(f, "unit"),
            ZeroVariancePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for ZeroVariancePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unit" => Ok(ZeroVariancePolicy::Unit),
            "reject" => Ok(ZeroVariancePolicy::Reject),
            other => Err(format!(
                "Unknown zero-variance policy '{}'. Options: unit, reject",
                other
            )),
        }
    }
}

/// Fitted statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub mean: f64,
    /// Population standard deviation of the training values
    pub std_dev: f64,
    /// Denominator used by `transform` (1.0 for constant columns)
    pub scale: f64,
}

impl ColumnStats {
    pub fn is_constant(&self) -> bool {
        self.std_dev == 0.0
    }
}

/// Fitted scaler; immutable once built and owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerState {
    columns: Vec<ColumnStats>,
    fitted_rows: usize,
}

/// Fit scaler statistics on `train`.
///
/// # Errors
/// `OncoError::Validation` if `train` has no rows, or a column is constant
/// under [`ZeroVariancePolicy::Reject`].
pub fn fit_scaler(train: &FeatureMatrix, policy: ZeroVariancePolicy) -> Result<ScalerState> {
    let n = train.n_rows();
    if n == 0 {
        return Err(OncoError::validation(
            "Cannot fit scaler on an empty training subset",
        ));
    }

    let names = train.feature_names();
    let mut columns = Vec::with_capacity(names.len());

    for (index, name) in names.into_iter().enumerate() {
        let values = train.column_values(index);
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        let std_dev = variance.sqrt();

        if !std_dev.is_finite() {
            return Err(OncoError::validation(format!(
                "Column '{}' has non-finite values in the training subset",
                name
            )));
        }

        let scale = if std_dev == 0.0 {
            match policy {
                ZeroVariancePolicy::Reject => {
                    return Err(OncoError::validation(format!(
                        "Column '{}' has zero variance in the training subset",
                        name
                    )));
                }
                ZeroVariancePolicy::Unit => {
                    log::warn!(
                        "column '{}' has zero variance in training data; centering only",
                        name
                    );
                    1.0
                }
            }
        } else {
            std_dev
        };

        columns.push(ColumnStats {
            name,
            mean,
            std_dev,
            scale,
        });
    }

    Ok(ScalerState {
        columns,
        fitted_rows: n,
    })
}

impl ScalerState {
    /// Per-column statistics in feature order
    pub fn stats(&self) -> &[ColumnStats] {
        &self.columns
    }

    /// Number of training rows the statistics were fitted on
    pub fn fitted_rows(&self) -> usize {
        self.fitted_rows
    }

    /// Names of columns scaled with the unit denominator
    pub fn constant_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_constant())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Apply `(x - mean) / scale` column by column.
    ///
    /// # Errors
    /// `OncoError::Validation` if the columns differ from the fitted ones.
    pub fn transform(&self, features: &FeatureMatrix) -> Result<FeatureMatrix> {
        let names = features.feature_names();
        let fitted: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        if names.iter().map(String::as_str).ne(fitted.iter().copied()) {
            return Err(OncoError::validation(format!(
                "Columns {:?} do not match fitted scaler columns {:?}",
                names, fitted
            )));
        }

        let scaled: Vec<Vec<f64>> = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, stats)| {
                features
                    .column_values(index)
                    .into_iter()
                    .map(|v| (v - stats.mean) / stats.scale)
                    .collect()
            })
            .collect();

        FeatureMatrix::from_columns(&names, scaled)
    }
}

/// Fit on `train`, then transform both `train` and `eval`.
pub fn scale_features(
    train: &FeatureMatrix,
    eval: &FeatureMatrix,
    policy: ZeroVariancePolicy,
) -> Result<(FeatureMatrix, FeatureMatrix, ScalerState)> {
    let scaler = fit_scaler(train, policy)?;
    let train_scaled = scaler.transform(train)?;
    let eval_scaled = scaler.transform(eval)?;
    Ok((train_scaled, eval_scaled, scaler))
}
