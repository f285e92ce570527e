//! Target column separation, label analysis and binary mapping
//!
//! The target column is removed from the cleaned dataset to produce the
//! feature matrix; its values become the label vector used for stratification.

use std::collections::BTreeSet;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::features::{row_index, FeatureMatrix};
use crate::error::{OncoError, Result};

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// Label vector (y), aligned 1:1 with the feature matrix rows
#[derive(Debug, Clone)]
pub struct LabelVector {
    series: Series,
}

impl LabelVector {
    pub fn new(series: Series) -> Self {
        Self { series }
    }

    /// Underlying label series (original dtype)
    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn name(&self) -> &str {
        self.series.name().as_str()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Labels rendered as strings; these are the class keys used for stratification.
    ///
    /// # Errors
    /// `OncoError::Validation` if a label is missing.
    pub fn class_keys(&self) -> Result<Vec<String>> {
        series_to_string_vec(&self.series)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value.ok_or_else(|| {
                    OncoError::validation(format!(
                        "Label column '{}' has a missing value at row {}",
                        self.name(),
                        row
                    ))
                })
            })
            .collect()
    }

    /// Distinct class keys, sorted
    pub fn classes(&self) -> Result<Vec<String>> {
        let distinct: BTreeSet<String> = self.class_keys()?.into_iter().collect();
        Ok(distinct.into_iter().collect())
    }

    /// Labels at `indices`, in the given order
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        Ok(Self {
            series: self.series.take(&row_index(indices))?,
        })
    }

    /// Map labels to 1 (event) / 0 (non-event) using `mapping`.
    ///
    /// # Errors
    /// `OncoError::Validation` if any label matches neither value.
    pub fn to_binary(&self, mapping: &TargetMapping) -> Result<LabelVector> {
        let encoded: Vec<i32> = self
            .class_keys()?
            .iter()
            .enumerate()
            .map(|(row, key)| {
                if key == &mapping.event_value {
                    Ok(1)
                } else if key == &mapping.non_event_value {
                    Ok(0)
                } else {
                    Err(OncoError::validation(format!(
                        "Label '{}' at row {} matches neither '{}' nor '{}'",
                        key, row, mapping.event_value, mapping.non_event_value
                    )))
                }
            })
            .collect::<Result<_>>()?;

        Ok(LabelVector::new(Series::new(self.series.name().clone(), encoded)))
    }
}

/// Mapping configuration for converting label values to binary 0/1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMapping {
    /// Value that maps to 1 (positive class, e.g. malignant)
    pub event_value: String,
    /// Value that maps to 0 (e.g. benign)
    pub non_event_value: String,
}

impl TargetMapping {
    pub fn new(event_value: String, non_event_value: String) -> Self {
        Self {
            event_value,
            non_event_value,
        }
    }

    /// Build a mapping from the positive label, taking the other class as non-event.
    pub fn from_positive(labels: &LabelVector, positive: &str) -> Result<Self> {
        let classes = labels.classes()?;
        if !classes.iter().any(|c| c == positive) {
            return Err(OncoError::validation(format!(
                "Positive label '{}' not present in '{}' (classes: {:?})",
                positive,
                labels.name(),
                classes
            )));
        }
        let negative = classes
            .iter()
            .find(|c| c.as_str() != positive)
            .cloned()
            .ok_or_else(|| {
                OncoError::validation(format!(
                    "Label column '{}' has no class other than '{}'",
                    labels.name(),
                    positive
                ))
            })?;
        Ok(Self::new(positive.to_string(), negative))
    }
}

/// Result of analyzing a label vector
#[derive(Debug, Clone)]
pub enum TargetAnalysis {
    /// Labels are already numeric 0/1
    AlreadyBinary,
    /// Labels need a mapping - contains these unique values
    NeedsMapping { unique_values: Vec<String> },
}

/// Determine whether labels are already 0/1 or need a [`TargetMapping`].
pub fn analyze_target(labels: &LabelVector) -> Result<TargetAnalysis> {
    let series = labels.series();
    if series.dtype().is_primitive_numeric() {
        let cast = series.cast(&DataType::Float64)?;
        let is_binary = cast
            .f64()?
            .into_iter()
            .flatten()
            .all(|v| v.abs() < TOLERANCE || (v - 1.0).abs() < TOLERANCE);
        if is_binary {
            return Ok(TargetAnalysis::AlreadyBinary);
        }
    }

    Ok(TargetAnalysis::NeedsMapping {
        unique_values: labels.classes()?,
    })
}

/// Separate the target column from a cleaned dataset.
///
/// # Errors
/// `OncoError::Validation` if `target` is absent, no feature column remains,
/// a feature is non-numeric, or the target does not hold exactly two classes.
pub fn split_features_labels(df: &DataFrame, target: &str) -> Result<(FeatureMatrix, LabelVector)> {
    let target_col = df.column(target).map_err(|_| {
        let available: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        OncoError::validation(format!(
            "Target column '{}' not found in dataset. Available columns: {:?}",
            target, available
        ))
    })?;

    let labels = LabelVector::new(target_col.as_materialized_series().clone());
    let feature_frame = df.drop(target)?;
    if feature_frame.width() == 0 {
        return Err(OncoError::validation(format!(
            "No feature columns remain after removing target '{}'",
            target
        )));
    }

    let classes = labels.classes()?;
    if classes.len() != 2 {
        return Err(OncoError::validation(format!(
            "Target column '{}' must hold exactly two classes, found {}: {:?}",
            target,
            classes.len(),
            classes
        )));
    }

    let features = FeatureMatrix::from_frame(&feature_frame)?;
    log::debug!(
        "split target '{}': {} feature(s), classes {:?}",
        target,
        features.n_features(),
        classes
    );

    Ok((features, labels))
}

/// Convert a series to a Vec of Option<String> for comparison
fn series_to_string_vec(series: &Series) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = series.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = series.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = series.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => series
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = series.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
