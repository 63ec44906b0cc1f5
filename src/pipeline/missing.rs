//! Missing value analysis over the transformed listings

use crate::pipeline::{CategoricalColumn, DateColumn, EnrichedListing, NumericColumn};

/// Missing ratio of every reported column, sorted descending.
///
/// Columns whose nulls do not mean missing (the review category) are skipped.
///
/// Ties keep column declaration order so output is stable between runs.
pub fn analyze_missing_values(rows: &[EnrichedListing]) -> Vec<(String, f64)> {
    // Handle empty input
    if rows.is_empty() {
        return Vec::new();
    }

    let total = rows.len() as f64;
    let ratio = |nulls: usize| nulls as f64 / total;

    let mut missing_ratios: Vec<(String, f64)> = Vec::new();

    for column in DateColumn::ALL {
        let nulls = rows.iter().filter(|r| column.value(r).is_none()).count();
        missing_ratios.push((column.name().to_string(), ratio(nulls)));
    }
    for column in NumericColumn::ALL {
        let nulls = rows.iter().filter(|r| column.value(r).is_none()).count();
        missing_ratios.push((column.name().to_string(), ratio(nulls)));
    }
    for column in CategoricalColumn::ALL {
        if column.null_label() != "missing" {
            continue;
        }
        let nulls = rows.iter().filter(|r| column.value(r).is_none()).count();
        missing_ratios.push((column.name().to_string(), ratio(nulls)));
    }

    // Stable sort by missing ratio descending
    missing_ratios.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    missing_ratios
}

/// Columns whose missing ratio is strictly above `threshold`
pub fn get_columns_above_threshold(missing_ratios: &[(String, f64)], threshold: f64) -> Vec<String> {
    missing_ratios
        .iter()
        .filter(|(_, ratio)| *ratio > threshold)
        .map(|(name, _)| name.clone())
        .collect()
}
