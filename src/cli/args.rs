//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::explain::DEFAULT_TOP_N;
use crate::pipeline::{PreprocessConfig, ZeroVariancePolicy};

/// Oncolens - prepare diagnosis data and summarize SHAP attributions
#[derive(Parser, Debug)]
#[command(name = "oncolens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean, split (stratified) and scale a CSV dataset
    Prepare(PrepareArgs),
    /// Rank features by mean absolute SHAP value
    Summarize(SummarizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PrepareArgs {
    /// Input CSV file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target (label) column name
    #[arg(short, long, default_value = "diagnosis")]
    pub target: String,

    /// Fraction of each class sent to the evaluation split, in (0, 1)
    #[arg(long, default_value = "0.2", value_parser = validate_test_fraction)]
    pub test_fraction: f64,

    /// Seed for the stratified shuffle
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Output directory for the split CSVs and scaler statistics.
    /// Defaults to the input directory with a '_splits' suffix (e.g., data.csv → data_splits/).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Columns to drop before processing (comma-separated), e.g. a patient id
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Handling of columns with zero variance in the training split.
    /// Options: "unit" (center only, default) or "reject" (fail)
    #[arg(long, default_value = "unit")]
    pub zero_variance: ZeroVariancePolicy,

    /// Label value of the positive class (written as 1; the other class as 0).
    /// Labels are written unchanged when omitted.
    #[arg(long)]
    pub positive_label: Option<String>,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl PrepareArgs {
    /// Get the output directory, deriving it from the input if not explicitly provided.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            let parent = self
                .input
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("dataset");
            parent.join(format!("{}_splits", stem))
        })
    }

    /// Pipeline configuration built from the arguments
    pub fn to_config(&self) -> PreprocessConfig {
        PreprocessConfig {
            target_column: self.target.clone(),
            test_fraction: self.test_fraction,
            seed: self.seed,
            drop_columns: self.drop_columns.clone(),
            zero_variance: self.zero_variance,
            infer_schema_length: self.infer_schema_length,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// Attribution CSV (samples x features, header row). Pass twice for
    /// two-class output: negative class first, positive class second.
    #[arg(short, long = "attributions", required = true, num_args = 1..=2)]
    pub attributions: Vec<PathBuf>,

    /// Feature CSV whose columns (target and artifact columns removed) name the
    /// attribution columns. Defaults to the attribution file header.
    #[arg(short, long)]
    pub features: Option<PathBuf>,

    /// Target column to exclude from the feature file
    #[arg(short, long, default_value = "diagnosis")]
    pub target: String,

    /// Number of top features to report
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N, value_parser = validate_top_n)]
    pub top_n: usize,

    /// Write the ranked summary as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Validator for test_fraction parameter
fn validate_test_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_fraction must be between 0.0 and 1.0 (exclusive), got {}",
            value
        ))
    }
}

/// Validator for top_n parameter
fn validate_top_n(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid positive integer", s))?;

    if value == 0 {
        Err("top_n must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
