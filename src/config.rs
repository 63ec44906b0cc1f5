//! Pipeline configuration
//!
//! Defaults reproduce the Asheville analysis. A JSON file may override any
//! subset of keys; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::pipeline::NumericColumn;

/// Zipcode of the Asheville central business district
pub const DEFAULT_CENTRAL_ZIPCODE: &str = "28801";

/// Ratings strictly above this value are classified as good
pub const DEFAULT_GOOD_REVIEW_THRESHOLD: f64 = 4.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub central_zipcode: String,
    pub good_review_threshold: f64,
    /// chrono format strings, tried in order
    pub date_formats: Vec<String>,
    pub days_per_year: f64,
    pub correlation_columns: Vec<NumericColumn>,
    pub pair_columns: Vec<NumericColumn>,
    pub histogram_bins: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            central_zipcode: DEFAULT_CENTRAL_ZIPCODE.to_string(),
            good_review_threshold: DEFAULT_GOOD_REVIEW_THRESHOLD,
            date_formats: vec!["%Y-%m-%d".to_string(), "%m/%d/%Y".to_string()],
            days_per_year: 365.25,
            correlation_columns: vec![
                NumericColumn::Price,
                NumericColumn::Accommodates,
                NumericColumn::Bedrooms,
                NumericColumn::Beds,
                NumericColumn::Bathrooms,
                NumericColumn::AmenitiesCount,
                NumericColumn::YearsHosting,
                NumericColumn::HostListingsCount,
                NumericColumn::HostResponseRate,
                NumericColumn::ReviewScoresRating,
                NumericColumn::MinimumNights,
            ],
            pair_columns: vec![
                NumericColumn::Price,
                NumericColumn::Accommodates,
                NumericColumn::Bathrooms,
                NumericColumn::AmenitiesCount,
                NumericColumn::ReviewScoresRating,
            ],
            histogram_bins: 10,
        }
    }
}

impl PipelineConfig {
    /// Load overrides from a JSON file and validate the result.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PipelineError::InputNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.central_zipcode.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "central_zipcode must not be empty".to_string(),
            ));
        }
        if !self.good_review_threshold.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "good_review_threshold must be finite, got {}",
                self.good_review_threshold
            )));
        }
        if self.date_formats.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one date format is required".to_string(),
            ));
        }
        if self.days_per_year.is_nan() || self.days_per_year <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "days_per_year must be positive, got {}",
                self.days_per_year
            )));
        }
        if self.correlation_columns.len() < 2 {
            return Err(PipelineError::InvalidConfig(
                "correlation_columns needs at least two columns".to_string(),
            ));
        }
        if self.pair_columns.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "pair_columns must not be empty".to_string(),
            ));
        }
        if self.histogram_bins == 0 {
            return Err(PipelineError::InvalidConfig(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
