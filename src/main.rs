//! Oncolens CLI
//!
//! `prepare` turns a raw diagnosis CSV into scaled train/eval splits;
//! `summarize` ranks features by mean absolute SHAP value.

use anyhow::Result;
use clap::Parser;

use oncolens::cli::{run_prepare, run_summarize, Cli, Commands};
use oncolens::utils::print_banner;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    print_banner(env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Prepare(args) => run_prepare(args),
        Commands::Summarize(args) => run_summarize(args),
    }
}
