//! Oncolens: explainable diagnosis support library
//!
//! Prepares tabular diagnosis measurements for model training (cleaning,
//! stratified partitioning, leak-free scaling) and condenses SHAP attribution
//! matrices into ranked top-feature summaries.

pub mod cli;
pub mod error;
pub mod explain;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::{OncoError, Result};
