//! CLI module - argument parsing and subcommand runners

pub mod args;
pub mod prepare;
pub mod summarize;

pub use args::{Cli, Commands, PrepareArgs, SummarizeArgs};
pub use prepare::run_prepare;
pub use summarize::run_summarize;
