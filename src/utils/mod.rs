//! Terminal helpers shared by the subcommands

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
