//! Mean-absolute attribution aggregation and top-N ranking

use faer::Mat;
use serde::Serialize;

use super::attribution::{normalize_attribution, Attribution};
use crate::error::{OncoError, Result};
use crate::pipeline::FeatureMatrix;

/// Number of features kept when the caller does not choose
pub const DEFAULT_TOP_N: usize = 5;

/// Which way a feature pushes predictions on average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward the positive class
    Positive,
    /// Away from the positive class
    Negative,
    Neutral,
}

impl Direction {
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Positive => "↑",
            Direction::Negative => "↓",
            Direction::Neutral => "·",
        }
    }
}

/// Aggregated attribution for one feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureAttribution {
    pub feature: String,
    /// Mean of absolute attribution values across samples
    pub score: f64,
    /// Mean of signed attribution values across samples
    pub mean_signed: f64,
}

impl FeatureAttribution {
    pub fn direction(&self) -> Direction {
        if self.mean_signed > 0.0 {
            Direction::Positive
        } else if self.mean_signed < 0.0 {
            Direction::Negative
        } else {
            Direction::Neutral
        }
    }
}

/// Ordered feature → score mapping, highest score first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedAttributions {
    entries: Vec<FeatureAttribution>,
}

impl RankedAttributions {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureAttribution> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[FeatureAttribution] {
        &self.entries
    }

    /// Feature names in rank order
    pub fn features(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.feature.as_str()).collect()
    }

    /// Score of `feature`, if it made the cut
    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.feature == feature)
            .map(|e| e.score)
    }

    pub fn into_vec(self) -> Vec<FeatureAttribution> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a RankedAttributions {
    type Item = &'a FeatureAttribution;
    type IntoIter = std::slice::Iter<'a, FeatureAttribution>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Per-column mean absolute (and mean signed) attribution, in column order.
///
/// Absolute values are taken before averaging so samples pushing in opposite
/// directions do not cancel out.
///
/// # Errors
/// `OncoError::Validation` if `feature_names` does not match the column count
/// or the matrix has no rows.
pub fn aggregate_attributions(
    matrix: &Mat<f64>,
    feature_names: &[String],
) -> Result<Vec<FeatureAttribution>> {
    if matrix.ncols() != feature_names.len() {
        return Err(OncoError::validation(format!(
            "Attribution matrix has {} columns but {} feature names were given",
            matrix.ncols(),
            feature_names.len()
        )));
    }
    let n = matrix.nrows();
    if n == 0 {
        return Err(OncoError::validation("Attribution matrix has no rows"));
    }

    let aggregated = feature_names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let (abs_sum, signed_sum) = (0..n).fold((0.0, 0.0), |(abs_acc, signed_acc), i| {
                let v = matrix[(i, j)];
                (abs_acc + v.abs(), signed_acc + v)
            });
            FeatureAttribution {
                feature: name.clone(),
                score: abs_sum / n as f64,
                mean_signed: signed_sum / n as f64,
            }
        })
        .collect();

    Ok(aggregated)
}

/// Sort by score descending (ties keep their input order) and keep the first `n`.
///
/// # Errors
/// `OncoError::Validation` if `n` is zero. An `n` above the feature count
/// returns every feature.
pub fn rank_top_n(scores: Vec<FeatureAttribution>, n: usize) -> Result<RankedAttributions> {
    if n == 0 {
        return Err(OncoError::validation("top_n must be at least 1"));
    }

    let mut entries = scores;
    // Vec::sort_by is stable
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(n);

    Ok(RankedAttributions { entries })
}

/// Normalize, aggregate and rank `raw` against `features`.
///
/// # Errors
/// `OncoError::Validation` when the attribution matrix does not have one row
/// per feature-matrix row and one column per feature, or `top_n` is zero.
pub fn summarize(
    raw: Attribution,
    features: &FeatureMatrix,
    top_n: usize,
) -> Result<RankedAttributions> {
    let feature_names = features.feature_names();
    check_request(&feature_names, top_n)?;
    let matrix = normalize_attribution(raw, feature_names.len())?;
    if matrix.nrows() != features.n_rows() {
        return Err(OncoError::validation(format!(
            "Attribution matrix has {} rows but the feature matrix has {}",
            matrix.nrows(),
            features.n_rows()
        )));
    }
    rank_matrix(&matrix, &feature_names, top_n)
}

/// Same as [`summarize`] with feature names supplied directly.
///
/// Only the column count is checked; there is no feature matrix to compare
/// the row count against.
pub fn summarize_with_names(
    raw: Attribution,
    feature_names: &[String],
    top_n: usize,
) -> Result<RankedAttributions> {
    check_request(feature_names, top_n)?;
    let matrix = normalize_attribution(raw, feature_names.len())?;
    rank_matrix(&matrix, feature_names, top_n)
}

fn check_request(feature_names: &[String], top_n: usize) -> Result<()> {
    if top_n == 0 {
        return Err(OncoError::validation("top_n must be at least 1"));
    }
    if feature_names.is_empty() {
        return Err(OncoError::validation("No feature names to summarize"));
    }
    Ok(())
}

fn rank_matrix(
    matrix: &Mat<f64>,
    feature_names: &[String],
    top_n: usize,
) -> Result<RankedAttributions> {
    let scores = aggregate_attributions(matrix, feature_names)?;
    let ranked = rank_top_n(scores, top_n)?;

    log::debug!(
        "summarized {} sample(s) x {} feature(s) into top {}",
        matrix.nrows(),
        feature_names.len(),
        ranked.len()
    );

    Ok(ranked)
}
