//! End-to-end preprocessing: load → clean → split → partition → scale

use std::path::Path;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use super::clean::clean_dataset;
use super::features::FeatureMatrix;
use super::loader::{load_dataset, DEFAULT_INFER_SCHEMA_LENGTH};
use super::partition::{stratified_partition, validate_test_fraction};
use super::scaler::{scale_features, ScalerState, ZeroVariancePolicy};
use super::target::{split_features_labels, LabelVector};
use crate::error::Result;

/// Parameters for a preprocessing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Label column separated from the features
    pub target_column: String,
    /// Share of each class sent to the evaluation subset, in (0, 1)
    pub test_fraction: f64,
    /// Seed for the stratified shuffle
    pub seed: u64,
    /// Extra columns to drop during cleaning (e.g. patient id)
    #[serde(default)]
    pub drop_columns: Vec<String>,
    #[serde(default)]
    pub zero_variance: ZeroVariancePolicy,
    /// Rows used for CSV schema inference (0 = full scan)
    pub infer_schema_length: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            target_column: "diagnosis".to_string(),
            test_fraction: 0.2,
            seed: 42,
            drop_columns: Vec::new(),
            zero_variance: ZeroVariancePolicy::default(),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
        }
    }
}

impl PreprocessConfig {
    pub fn new(target_column: impl Into<String>, test_fraction: f64, seed: u64) -> Self {
        Self {
            target_column: target_column.into(),
            test_fraction,
            seed,
            ..Default::default()
        }
    }
}

/// Output of a preprocessing run
#[derive(Debug, Clone)]
pub struct PreparedSplits {
    pub train: FeatureMatrix,
    pub eval: FeatureMatrix,
    pub train_labels: LabelVector,
    pub eval_labels: LabelVector,
    /// Original (post-cleaning) row positions of each subset
    pub train_indices: Vec<usize>,
    pub eval_indices: Vec<usize>,
    /// Statistics fitted on the training subset
    pub scaler: ScalerState,
    /// Rows before cleaning
    pub raw_rows: usize,
    /// Rows after cleaning
    pub clean_rows: usize,
    pub dropped_columns: Vec<String>,
    pub dropped_rows: usize,
}

impl PreparedSplits {
    pub fn feature_names(&self) -> Vec<String> {
        self.train.feature_names()
    }
}

/// Run the full pipeline on a CSV file.
///
/// Identical `path` and `config` always yield bit-identical splits.
pub fn run_preprocessing(path: &Path, config: &PreprocessConfig) -> Result<PreparedSplits> {
    validate_test_fraction(config.test_fraction)?;
    let df = load_dataset(path, config.infer_schema_length)?;
    preprocess_frame(&df, config)
}

/// Run clean → split → partition → scale on an in-memory frame.
pub fn preprocess_frame(df: &DataFrame, config: &PreprocessConfig) -> Result<PreparedSplits> {
    validate_test_fraction(config.test_fraction)?;

    let cleaned = clean_dataset(df, &config.drop_columns)?;
    let (features, labels) = split_features_labels(&cleaned.frame, &config.target_column)?;
    let split = stratified_partition(&features, &labels, config.test_fraction, config.seed)?;
    let (train, eval, scaler) = scale_features(&split.train, &split.eval, config.zero_variance)?;

    log::info!(
        "preprocessing complete: {} features, {} train rows, {} eval rows",
        train.n_features(),
        train.n_rows(),
        eval.n_rows()
    );

    Ok(PreparedSplits {
        train,
        eval,
        train_labels: split.train_labels,
        eval_labels: split.eval_labels,
        train_indices: split.train_indices,
        eval_indices: split.eval_indices,
        scaler,
        raw_rows: df.height(),
        clean_rows: cleaned.frame.height(),
        dropped_columns: cleaned.dropped_columns,
        dropped_rows: cleaned.dropped_rows,
    })
}
