//! Pipeline module - turns a raw CSV into clean, leak-free, scaled splits

pub mod clean;
pub mod features;
pub mod loader;
pub mod partition;
pub mod preprocess;
pub mod scaler;
pub mod target;

pub use clean::*;
pub use features::FeatureMatrix;
pub use loader::*;
pub use partition::*;
pub use preprocess::*;
pub use scaler::*;
pub use target::*;
