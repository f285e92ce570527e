//! Explain module - condenses attribution matrices into ranked summaries

pub mod attribution;
pub mod summary;

pub use attribution::*;
pub use summary::*;
