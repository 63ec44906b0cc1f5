//! Command-line argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

use crate::config::PipelineConfig;
use crate::error::Result;

/// listscope - Clean a listing export and report descriptive statistics
#[derive(Parser, Debug)]
#[command(name = "listscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input listing export (CSV)
    #[arg(short, long, default_value = "data/listings.csv")]
    pub input: PathBuf,

    /// JSON file overriding pipeline configuration keys
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Zipcode flagged as the central business district
    #[arg(long)]
    pub central_zipcode: Option<String>,

    /// Ratings strictly above this value are classified as good
    #[arg(long)]
    pub good_review_threshold: Option<f64>,

    /// Number of histogram bins in the pairwise views
    #[arg(long)]
    pub bins: Option<usize>,

    /// Skip the histogram and scatter views
    #[arg(long, default_value = "false")]
    pub no_plots: bool,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Defaults, then the JSON file, then explicit flags.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(zipcode) = &self.central_zipcode {
            config.central_zipcode = zipcode.clone();
        }
        if let Some(threshold) = self.good_review_threshold {
            config.good_review_threshold = threshold;
        }
        if let Some(bins) = self.bins {
            config.histogram_bins = bins;
        }

        config.validate()?;
        Ok(config)
    }
}
