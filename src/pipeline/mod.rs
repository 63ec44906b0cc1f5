//! Pipeline module - load, select, normalize and derive listing records

pub mod correlation;
pub mod derived;
pub mod loader;
pub mod missing;
pub mod normalize;
pub mod record;
pub mod select;
pub mod stats;

pub use correlation::*;
pub use derived::*;
pub use loader::*;
pub use missing::*;
pub use normalize::*;
pub use record::*;
pub use select::*;

use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::Result;

/// Output of a full pipeline run, ready for reporting.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub listings: Vec<EnrichedListing>,
    pub failures: ParseFailures,
    pub review_cutoff: Option<f64>,
}

/// Run every stage on an export: load, select, normalize, synthesize.
pub fn run_pipeline(path: &Path, config: &PipelineConfig) -> Result<PipelineOutput> {
    let df = load_listings(path)?;
    let projected = select_columns(&df)?;
    let raws = to_raw_listings(&projected)?;
    Ok(transform(&raws, config))
}

/// Normalize and synthesize already-selected raw rows.
pub fn transform(raws: &[RawListing], config: &PipelineConfig) -> PipelineOutput {
    let normalized = normalize(raws, config);
    let synthesized = synthesize(normalized.listings, config);
    PipelineOutput {
        listings: synthesized.listings,
        failures: normalized.failures,
        review_cutoff: synthesized.review_cutoff,
    }
}
