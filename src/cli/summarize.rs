//! `summarize` subcommand: rank features by mean absolute attribution

use std::path::Path;

use anyhow::{Context, Result};

use super::args::SummarizeArgs;
use crate::explain::{read_attribution_csv, summarize_with_names, Attribution};
use crate::pipeline::{
    clean_dataset, load_dataset, FeatureMatrix, DEFAULT_INFER_SCHEMA_LENGTH,
};
use crate::report::{export_summary_json, format_ranked_list, AttributionReport, ExportParams};
use crate::utils::{print_info, print_success};

/// Run the `summarize` subcommand
pub fn run_summarize(args: &SummarizeArgs) -> Result<()> {
    let mut headers = Vec::with_capacity(args.attributions.len());
    let mut matrices = Vec::with_capacity(args.attributions.len());
    for path in &args.attributions {
        let (header, matrix) = read_attribution_csv(path)?;
        print_success(&format!(
            "Loaded {} ({} x {})",
            path.display(),
            matrix.nrows(),
            matrix.ncols()
        ));
        headers.push(header);
        matrices.push(matrix);
    }

    let feature_names = match &args.features {
        Some(path) => feature_names_from_file(path, &args.target)?,
        None => headers.last().cloned().unwrap_or_default(),
    };

    if let Some(header) = headers.last() {
        if header != &feature_names {
            log::warn!(
                "attribution header differs from feature names; columns are matched by position"
            );
        }
    }

    let attribution = Attribution::from_matrices(matrices)?;
    if matches!(attribution, Attribution::TwoClass { .. }) {
        print_info("Two-class attributions: using the positive (second) class");
    }
    let samples = attribution.n_samples();

    let ranked = summarize_with_names(attribution, &feature_names, args.top_n)?;

    AttributionReport::new(&ranked, samples).display();
    println!();
    for line in format_ranked_list(&ranked) {
        println!("    {}", line);
    }

    if let Some(json_path) = &args.json {
        let files: Vec<String> = args
            .attributions
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let feature_file = args.features.as_ref().map(|p| p.display().to_string());
        let params = ExportParams {
            attribution_files: &files,
            feature_file: feature_file.as_deref(),
            samples,
            total_features: feature_names.len(),
            top_n: args.top_n,
        };
        export_summary_json(&ranked, json_path, &params)
            .with_context(|| format!("Failed to export summary to {}", json_path.display()))?;
        println!();
        print_success(&format!("Summary written to {}", json_path.display()));
    }

    Ok(())
}

/// Canonical feature names from a feature CSV: artifact columns and `target` removed
pub fn feature_names_from_file(path: &Path, target: &str) -> Result<Vec<String>> {
    let df = load_dataset(path, DEFAULT_INFER_SCHEMA_LENGTH)?;
    let cleaned = clean_dataset(&df, &[target.to_string()])?;
    let features = FeatureMatrix::from_frame(&cleaned.frame)?;
    Ok(features.feature_names())
}
