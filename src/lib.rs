//! listscope: Listing Export Analysis Library
//!
//! Loads a short-term rental listing export, normalizes and derives typed
//! listing fields, and reports descriptive statistics, complete-observation
//! correlations and pairwise views ahead of price modeling.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::PipelineConfig;
pub use error::PipelineError;
