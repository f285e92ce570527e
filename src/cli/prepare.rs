//! `prepare` subcommand: run the preprocessing pipeline and write the splits

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use super::args::PrepareArgs;
use crate::pipeline::{
    analyze_target, dataset_stats, load_dataset, preprocess_frame, FeatureMatrix, LabelVector,
    PreparedSplits, TargetAnalysis, TargetMapping,
};
use crate::report::PreparationSummary;
use crate::utils::{
    create_spinner, finish_with_error, finish_with_success, print_completion, print_info,
    print_prepare_config, print_step_header, print_success,
};

/// File names written into the output directory
pub const TRAIN_FEATURES_FILE: &str = "train_features.csv";
pub const EVAL_FEATURES_FILE: &str = "eval_features.csv";
pub const TRAIN_LABELS_FILE: &str = "train_labels.csv";
pub const EVAL_LABELS_FILE: &str = "eval_labels.csv";
pub const SCALER_FILE: &str = "scaler.json";

/// Run the `prepare` subcommand
pub fn run_prepare(args: &PrepareArgs) -> Result<()> {
    let config = args.to_config();
    let output_dir = args.resolved_output_dir();

    print_prepare_config(
        &args.input,
        &config.target_column,
        &output_dir,
        config.test_fraction,
        config.seed,
    );

    // Step 1: Load
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV...");
    let df = match load_dataset(&args.input, config.infer_schema_length) {
        Ok(df) => df,
        Err(e) => {
            finish_with_error(&spinner, "Failed to load dataset");
            return Err(e.into());
        }
    };
    finish_with_success(&spinner, "Dataset loaded");
    let (rows, cols, memory_mb) = dataset_stats(&df);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    println!(
        "      {}",
        style(format!("{:.2?}", step_start.elapsed())).dim()
    );

    // Step 2: Clean, split, partition, scale
    print_step_header(2, "Clean, Partition & Scale");
    let spinner = create_spinner("Preparing splits...");
    let splits = match preprocess_frame(&df, &config) {
        Ok(splits) => splits,
        Err(e) => {
            finish_with_error(&spinner, "Preprocessing failed");
            return Err(e.into());
        }
    };
    finish_with_success(&spinner, "Splits prepared");

    let (train_labels, eval_labels) = resolve_labels(&splits, args.positive_label.as_deref())?;

    // Step 3: Save
    print_step_header(3, "Save Results");
    let spinner = create_spinner("Writing output files...");
    if let Err(e) = write_splits(&splits, &train_labels, &eval_labels, &output_dir) {
        finish_with_error(&spinner, "Failed to write output files");
        return Err(e);
    }
    finish_with_success(&spinner, &format!("Saved to {}", output_dir.display()));

    PreparationSummary::from_splits(&splits)?.display();
    print_completion("Preparation complete!");

    Ok(())
}

/// Apply the optional positive-label mapping to both label vectors
fn resolve_labels(
    splits: &PreparedSplits,
    positive_label: Option<&str>,
) -> Result<(LabelVector, LabelVector)> {
    match positive_label {
        Some(positive) => {
            let mapping = TargetMapping::from_positive(&splits.train_labels, positive)?;
            print_success(&format!(
                "Labels mapped: '{}' → 1, '{}' → 0",
                mapping.event_value, mapping.non_event_value
            ));
            Ok((
                splits.train_labels.to_binary(&mapping)?,
                splits.eval_labels.to_binary(&mapping)?,
            ))
        }
        None => {
            if let TargetAnalysis::NeedsMapping { unique_values } =
                analyze_target(&splits.train_labels)?
            {
                print_info(&format!(
                    "Labels written unchanged ({}); pass --positive-label to encode as 0/1",
                    unique_values.join(", ")
                ));
            }
            Ok((splits.train_labels.clone(), splits.eval_labels.clone()))
        }
    }
}

/// Write feature/label CSVs and the fitted scaler into `output_dir`
pub fn write_splits(
    splits: &PreparedSplits,
    train_labels: &LabelVector,
    eval_labels: &LabelVector,
    output_dir: &Path,
) -> Result<()> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    write_features(&splits.train, &output_dir.join(TRAIN_FEATURES_FILE))?;
    write_features(&splits.eval, &output_dir.join(EVAL_FEATURES_FILE))?;
    write_labels(train_labels, &output_dir.join(TRAIN_LABELS_FILE))?;
    write_labels(eval_labels, &output_dir.join(EVAL_LABELS_FILE))?;

    let scaler_path = output_dir.join(SCALER_FILE);
    let json = serde_json::to_string_pretty(&splits.scaler)
        .context("Failed to serialize scaler statistics")?;
    std::fs::write(&scaler_path, json)
        .with_context(|| format!("Failed to write {}", scaler_path.display()))?;

    Ok(())
}

fn write_features(features: &FeatureMatrix, path: &Path) -> Result<()> {
    let mut df = features.frame().clone();
    write_csv(&mut df, path)
}

fn write_labels(labels: &LabelVector, path: &Path) -> Result<()> {
    let mut df = DataFrame::new(vec![labels.series().clone().into()])?;
    write_csv(&mut df, path)
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}
