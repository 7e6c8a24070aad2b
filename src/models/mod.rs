//! Report models for the benchmark binary
//!
//! Serializable summaries of a walkthrough and a timing run.

pub mod report;

// Re-export commonly used types
pub use report::{BenchReport, SizeSample, VarianceRatios, WalkthroughReport};
