//! GitScope Analysis - repository analysis pipeline
//!
//! Builds the file tree, extracts import dependencies, and aggregates
//! commit and contributor activity into one `AnalysisReport`.

pub mod commits;
pub mod contributors;
pub mod imports;
pub mod insights;
pub mod language;
pub mod pipeline;
pub mod tree;

pub use commits::*;
pub use contributors::*;
pub use imports::*;
pub use insights::*;
pub use language::*;
pub use pipeline::*;
pub use tree::*;
