//! Attribution summary export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::explain::{FeatureAttribution, RankedAttributions};

/// Metadata about the summarization run
#[derive(Serialize)]
pub struct SummaryMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Oncolens version
    pub oncolens_version: String,
    /// Attribution files, negative class first for two-class input
    pub attribution_files: Vec<String>,
    /// Feature file that supplied the column names (if used)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_file: Option<String>,
    /// Samples aggregated
    pub samples: usize,
    /// Features in the attribution matrix
    pub total_features: usize,
    /// Requested top-N
    pub top_n: usize,
}

/// Ranked entry with its 1-based rank
#[derive(Serialize)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    #[serde(flatten)]
    pub attribution: &'a FeatureAttribution,
    pub direction: &'static str,
}

/// Complete summary export with metadata
#[derive(Serialize)]
pub struct SummaryExport<'a> {
    pub metadata: SummaryMetadata,
    pub top_features: Vec<RankedEntry<'a>>,
}

/// Parameters for summary export metadata
pub struct ExportParams<'a> {
    pub attribution_files: &'a [String],
    pub feature_file: Option<&'a str>,
    pub samples: usize,
    pub total_features: usize,
    pub top_n: usize,
}

/// Build the export document without writing it
pub fn build_summary_export<'a>(
    ranked: &'a RankedAttributions,
    params: &ExportParams,
) -> SummaryExport<'a> {
    let top_features = ranked
        .iter()
        .enumerate()
        .map(|(i, attribution)| RankedEntry {
            rank: i + 1,
            attribution,
            direction: match attribution.direction() {
                crate::explain::Direction::Positive => "positive",
                crate::explain::Direction::Negative => "negative",
                crate::explain::Direction::Neutral => "neutral",
            },
        })
        .collect();

    SummaryExport {
        metadata: SummaryMetadata {
            timestamp: Utc::now().to_rfc3339(),
            oncolens_version: env!("CARGO_PKG_VERSION").to_string(),
            attribution_files: params.attribution_files.to_vec(),
            feature_file: params.feature_file.map(|s| s.to_string()),
            samples: params.samples,
            total_features: params.total_features,
            top_n: params.top_n,
        },
        top_features,
    }
}

/// Export a ranked summary to a pretty-printed JSON file
pub fn export_summary_json(
    ranked: &RankedAttributions,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = build_summary_export(ranked, params);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize attribution summary to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write attribution summary to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
