//! Descriptive statistics for the transformed listings

use std::collections::BTreeMap;

use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;
use rayon::prelude::*;

use crate::pipeline::stats::{mean, quantile_sorted, sample_std, sorted_present};
use crate::pipeline::{
    analyze_missing_values, get_columns_above_threshold, CategoricalColumn, DateColumn,
    EnrichedListing, NumericColumn, ParseFailures,
};

/// Levels shown per categorical column before the remainder is folded
pub const MAX_LEVELS_SHOWN: usize = 10;

/// Missing ratio above which a column is called out under the tables
pub const HIGH_MISSING_RATIO: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub name: &'static str,
    pub count: usize,
    pub missing: usize,
    pub unparsed: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub name: &'static str,
    pub count: usize,
    pub missing: usize,
    pub unparsed: usize,
    /// Meaning of the null count, shown next to it when not `missing`
    pub null_label: &'static str,
    /// (level, count), most frequent first, ties by level
    pub levels: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateSummary {
    pub name: &'static str,
    pub count: usize,
    pub missing: usize,
    pub unparsed: usize,
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

/// Summary of every reported column.
///
/// `id`, raw `amenities` and raw `bathrooms_text` are not reported.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub rows: usize,
    pub dates: Vec<DateSummary>,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<LevelSummary>,
    pub missing_ratios: Vec<(String, f64)>,
    pub review_cutoff: Option<f64>,
    pub total_unparsed: usize,
}

pub fn describe(
    rows: &[EnrichedListing],
    failures: &ParseFailures,
    review_cutoff: Option<f64>,
) -> SummaryReport {
    // collect() on an indexed parallel iterator preserves column order
    let numeric: Vec<NumericSummary> = NumericColumn::ALL
        .as_slice()
        .par_iter()
        .map(|column| describe_numeric(*column, rows, failures))
        .collect();

    let categorical = CategoricalColumn::ALL
        .iter()
        .map(|column| describe_levels(*column, rows, failures))
        .collect();

    let dates = DateColumn::ALL
        .iter()
        .map(|column| {
            let values: Vec<NaiveDate> = rows.iter().filter_map(|r| column.value(r)).collect();
            DateSummary {
                name: column.name(),
                count: values.len(),
                missing: rows.len() - values.len(),
                unparsed: failures.get(column.name()),
                min: values.iter().min().copied(),
                max: values.iter().max().copied(),
            }
        })
        .collect();

    SummaryReport {
        rows: rows.len(),
        dates,
        numeric,
        categorical,
        missing_ratios: analyze_missing_values(rows),
        review_cutoff,
        total_unparsed: failures.total(),
    }
}

fn describe_numeric(
    column: NumericColumn,
    rows: &[EnrichedListing],
    failures: &ParseFailures,
) -> NumericSummary {
    let sorted = sorted_present(&column.values(rows));
    NumericSummary {
        name: column.name(),
        count: sorted.len(),
        missing: rows.len() - sorted.len(),
        unparsed: failures.get(column.name()),
        mean: mean(&sorted),
        std: sample_std(&sorted),
        min: sorted.first().copied(),
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

fn describe_levels(
    column: CategoricalColumn,
    rows: &[EnrichedListing],
    failures: &ParseFailures,
) -> LevelSummary {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut missing = 0;
    for row in rows {
        match column.value(row) {
            Some(level) => *counts.entry(level).or_insert(0) += 1,
            None => missing += 1,
        }
    }

    let mut levels: Vec<(String, usize)> = counts.into_iter().collect();
    // BTreeMap order breaks ties by level name
    levels.sort_by(|a, b| b.1.cmp(&a.1));

    LevelSummary {
        name: column.name(),
        count: rows.len() - missing,
        missing,
        unparsed: failures.get(column.name()),
        null_label: column.null_label(),
        levels,
    }
}

impl SummaryReport {
    /// Plain-text rendering. Pure function of the report, so identical input
    /// yields identical bytes on a terminal and in a pipe.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Listings: {}\n", self.rows));
        out.push_str(&format!(
            "Review cutoff (five-number summary, position 3): {}\n",
            fmt_opt(self.review_cutoff)
        ));
        out.push_str(&format!("Unparsed cells set to null: {}\n\n", self.total_unparsed));

        let mut numeric = plain_table();
        numeric.set_header(header(&[
            "Column", "N", "Missing", "Unparsed", "Mean", "Std", "Min", "Q1", "Median", "Q3",
            "Max",
        ]));
        for s in &self.numeric {
            numeric.add_row(vec![
                Cell::new(s.name),
                num_cell(s.count.to_string()),
                num_cell(s.missing.to_string()),
                num_cell(s.unparsed.to_string()),
                num_cell(fmt_opt(s.mean)),
                num_cell(fmt_opt(s.std)),
                num_cell(fmt_opt(s.min)),
                num_cell(fmt_opt(s.q1)),
                num_cell(fmt_opt(s.median)),
                num_cell(fmt_opt(s.q3)),
                num_cell(fmt_opt(s.max)),
            ]);
        }
        out.push_str(&numeric.to_string());
        out.push_str("\n\n");

        let mut dates = plain_table();
        dates.set_header(header(&["Column", "N", "Missing", "Unparsed", "Earliest", "Latest"]));
        for s in &self.dates {
            dates.add_row(vec![
                Cell::new(s.name),
                num_cell(s.count.to_string()),
                num_cell(s.missing.to_string()),
                num_cell(s.unparsed.to_string()),
                Cell::new(s.min.map(|d| d.to_string()).unwrap_or_else(|| "NA".to_string())),
                Cell::new(s.max.map(|d| d.to_string()).unwrap_or_else(|| "NA".to_string())),
            ]);
        }
        out.push_str(&dates.to_string());
        out.push_str("\n\n");

        let mut levels = plain_table();
        levels.set_header(header(&["Column", "N", "Missing", "Unparsed", "Levels", "Counts"]));
        for s in &self.categorical {
            let mut shown: Vec<String> = s
                .levels
                .iter()
                .take(MAX_LEVELS_SHOWN)
                .map(|(level, n)| format!("{}: {}", level, n))
                .collect();
            if s.levels.len() > MAX_LEVELS_SHOWN {
                shown.push(format!("({} more)", s.levels.len() - MAX_LEVELS_SHOWN));
            }
            let nulls = if s.null_label == "missing" {
                s.missing.to_string()
            } else {
                format!("{} {}", s.missing, s.null_label)
            };
            levels.add_row(vec![
                Cell::new(s.name),
                num_cell(s.count.to_string()),
                num_cell(nulls),
                num_cell(s.unparsed.to_string()),
                num_cell(s.levels.len().to_string()),
                Cell::new(shown.join("\n")),
            ]);
        }
        out.push_str(&levels.to_string());
        out.push('\n');

        let sparse = get_columns_above_threshold(&self.missing_ratios, HIGH_MISSING_RATIO);
        if !sparse.is_empty() {
            out.push_str(&format!(
                "\nColumns with more than {:.0}% missing: {}\n",
                HIGH_MISSING_RATIO * 100.0,
                sparse.join(", ")
            ));
        }

        out
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SUMMARY STATISTICS").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the tables
        for line in self.render().lines() {
            println!("    {}", line);
        }
    }
}

/// Condensed table with TTY detection off, so bold headers are never
/// emitted as ANSI codes and the rendering does not depend on stdout.
pub(crate) fn plain_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).force_no_tty();
    table
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn num_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub(crate) fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_nan() => "NaN".to_string(),
        Some(v) => format!("{:.3}", v),
        None => "NA".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Listing, ReviewCategory};

    fn row(price: Option<f64>, factor: Option<ReviewCategory>) -> EnrichedListing {
        EnrichedListing {
            listing: Listing {
                price,
                ..Default::default()
            },
            review_scores_factor: factor,
            ..Default::default()
        }
    }

    #[test]
    fn test_numeric_summary_counts_missing() {
        let rows = vec![
            row(Some(100.0), None),
            row(Some(200.0), None),
            row(None, None),
            row(Some(300.0), None),
        ];
        let report = describe(&rows, &ParseFailures::default(), None);
        let price = report.numeric.iter().find(|s| s.name == "price").unwrap();

        assert_eq!(price.count, 3);
        assert_eq!(price.missing, 1);
        assert_eq!(price.mean, Some(200.0));
        assert_eq!(price.median, Some(200.0));
        assert_eq!(price.q1, Some(150.0));
        assert_eq!(price.std, Some(100.0));
    }

    #[test]
    fn test_levels_sorted_by_frequency() {
        let rows = vec![
            row(None, Some(ReviewCategory::Bad)),
            row(None, Some(ReviewCategory::Good)),
            row(None, Some(ReviewCategory::Good)),
            row(None, None),
        ];
        let report = describe(&rows, &ParseFailures::default(), None);
        let factor = report
            .categorical
            .iter()
            .find(|s| s.name == "review_scores_factor")
            .unwrap();

        assert_eq!(factor.missing, 1);
        assert_eq!(
            factor.levels,
            vec![("good".to_string(), 2), ("bad".to_string(), 1)]
        );
    }

    #[test]
    fn test_excluded_columns_not_reported() {
        let report = describe(&[row(Some(1.0), None)], &ParseFailures::default(), None);
        let rendered = report.render();
        assert!(!rendered.contains("bathrooms_text"));
        assert!(!rendered.contains("│ amenities "));
        assert!(!rendered.contains("│ id "));
        assert!(rendered.contains("amenities_count"));
    }

    #[test]
    fn test_review_factor_nulls_reported_as_unclassified() {
        let rows = vec![
            row(None, Some(ReviewCategory::Missing)),
            row(None, Some(ReviewCategory::Good)),
            row(None, None),
            row(None, None),
        ];
        let report = describe(&rows, &ParseFailures::default(), Some(4.5));
        let factor = report
            .categorical
            .iter()
            .find(|s| s.name == "review_scores_factor")
            .unwrap();

        assert_eq!(factor.null_label, "unclassified");
        assert_eq!(factor.missing, 2);
        assert!(report.render().contains("2 unclassified"));
        assert!(!report
            .missing_ratios
            .iter()
            .any(|(name, _)| name == "review_scores_factor"));
    }

    #[test]
    fn test_render_has_no_escape_codes() {
        let rows = vec![row(Some(10.0), Some(ReviewCategory::Good))];
        let rendered = describe(&rows, &ParseFailures::default(), None).render();
        assert!(!rendered.contains('\u{1b}'));
        assert!(rendered.contains("Column"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let rows = vec![row(Some(1.5), None), row(Some(2.5), Some(ReviewCategory::Missing))];
        let a = describe(&rows, &ParseFailures::default(), Some(4.7)).render();
        let b = describe(&rows, &ParseFailures::default(), Some(4.7)).render();
        assert_eq!(a, b);
    }
}
