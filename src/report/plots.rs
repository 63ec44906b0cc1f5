//! Terminal pairwise-relationship views: histograms and scatter density grids
//!
//! These are for eyeballing distributions before modeling. Nothing here is
//! meant to be machine-read.

use console::style;

use crate::pipeline::stats::sorted_present;
use crate::pipeline::{EnrichedListing, NumericColumn};

/// Width in characters of the longest histogram bar
pub const BAR_WIDTH: usize = 40;

/// Scatter grid size in characters
pub const GRID_COLS: usize = 40;
pub const GRID_ROWS: usize = 12;

/// Density ramp for scatter cells, sparse to dense
const DENSITY: [char; 6] = ['·', ':', '+', '*', '#', '@'];

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram over the non-null values.
pub fn histogram(values: &[Option<f64>], bins: usize) -> Vec<HistogramBin> {
    let sorted = sorted_present(values);
    let (min, max) = match (sorted.first(), sorted.last()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Vec::new(),
    };

    if bins == 0 {
        return Vec::new();
    }

    if min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: sorted.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];

    for value in &sorted {
        let mut index = ((value - min) / width) as usize;
        if index >= bins {
            index = bins - 1;
        }
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: min + idx as f64 * width,
            end: min + (idx as f64 + 1.0) * width,
            count,
        })
        .collect()
}

pub fn render_histogram(name: &str, bins: &[HistogramBin]) -> String {
    let mut out = format!("{}\n", name);
    if bins.is_empty() {
        out.push_str("  (no values)\n");
        return out;
    }

    let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in bins {
        let len = (bin.count * BAR_WIDTH).div_ceil(peak);
        out.push_str(&format!(
            "  {:>10.2} – {:<10.2} │{:<width$} {}\n",
            bin.start,
            bin.end,
            "█".repeat(len),
            bin.count,
            width = BAR_WIDTH
        ));
    }
    out
}

/// Counts of (x, y) pairs per grid cell, row 0 at the top (largest y).
///
/// Only pairs where both values are present are plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGrid {
    pub cells: Vec<Vec<usize>>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub points: usize,
}

pub fn scatter_grid(x: &[Option<f64>], y: &[Option<f64>], cols: usize, rows: usize) -> Option<ScatterGrid> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.is_empty() || cols == 0 || rows == 0 {
        return None;
    }

    let x_min = pairs.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = pairs.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_min = pairs.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = pairs.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let slot = |v: f64, lo: f64, hi: f64, n: usize| -> usize {
        if hi == lo {
            return 0;
        }
        (((v - lo) / (hi - lo)) * n as f64).min(n as f64 - 1.0) as usize
    };

    let mut cells = vec![vec![0usize; cols]; rows];
    for (a, b) in &pairs {
        let c = slot(*a, x_min, x_max, cols);
        let r = rows - 1 - slot(*b, y_min, y_max, rows);
        cells[r][c] += 1;
    }

    Some(ScatterGrid {
        cells,
        x_range: (x_min, x_max),
        y_range: (y_min, y_max),
        points: pairs.len(),
    })
}

pub fn render_scatter(x_name: &str, y_name: &str, grid: &ScatterGrid) -> String {
    let peak = grid.cells.iter().flatten().copied().max().unwrap_or(0).max(1);
    let mut out = format!("{} (y) vs {} (x), {} points\n", y_name, x_name, grid.points);

    let last = grid.cells.len().saturating_sub(1);
    for (i, row) in grid.cells.iter().enumerate() {
        let label = if i == 0 {
            format!("{:>10.2}", grid.y_range.1)
        } else if i == last {
            format!("{:>10.2}", grid.y_range.0)
        } else {
            " ".repeat(10)
        };
        let line: String = row
            .iter()
            .map(|&n| {
                if n == 0 {
                    ' '
                } else {
                    let idx = (n * DENSITY.len()).div_ceil(peak).clamp(1, DENSITY.len()) - 1;
                    DENSITY[idx]
                }
            })
            .collect();
        out.push_str(&format!("  {} │{}\n", label, line));
    }
    let width = grid.cells.first().map(|r| r.len()).unwrap_or(0);
    out.push_str(&format!("  {} └{}\n", " ".repeat(10), "─".repeat(width)));
    out.push_str(&format!(
        "  {}  {:<w$.2}{:>8.2}\n",
        " ".repeat(10),
        grid.x_range.0,
        grid.x_range.1,
        w = width.saturating_sub(8)
    ));
    out
}

/// Histograms of each column, then a scatter grid for every column pair.
pub fn render_pair_views(rows: &[EnrichedListing], columns: &[NumericColumn], bins: usize) -> String {
    let mut out = String::new();

    for column in columns {
        out.push_str(&render_histogram(column.name(), &histogram(&column.values(rows), bins)));
        out.push('\n');
    }

    for (i, x) in columns.iter().enumerate() {
        for y in &columns[i + 1..] {
            match scatter_grid(&x.values(rows), &y.values(rows), GRID_COLS, GRID_ROWS) {
                Some(grid) => out.push_str(&render_scatter(x.name(), y.name(), &grid)),
                None => out.push_str(&format!("{} vs {}: no complete pairs\n", y.name(), x.name())),
            }
            out.push('\n');
        }
    }

    out
}

pub fn display_pair_views(rows: &[EnrichedListing], columns: &[NumericColumn], bins: usize) {
    println!();
    println!(
        "    {} {}",
        style("📈").cyan(),
        style("PAIRWISE RELATIONSHIPS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();
    for line in render_pair_views(rows, columns, bins).lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_all_present_values() {
        let values = [Some(1.0), Some(2.0), None, Some(3.0), Some(10.0)];
        let bins = histogram(&values, 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
        // max lands in the last bin
        assert_eq!(bins[2].count, 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        assert_eq!(histogram(&[Some(2.0), Some(2.0)], 5).len(), 1);
        assert!(histogram(&[None, None], 5).is_empty());
    }

    #[test]
    fn test_scatter_grid_places_extremes_in_corners() {
        let x = [Some(0.0), Some(10.0), None];
        let y = [Some(0.0), Some(5.0), Some(1.0)];
        let grid = scatter_grid(&x, &y, 4, 3).unwrap();

        assert_eq!(grid.points, 2);
        // largest y is drawn on the top row
        assert_eq!(grid.cells[0][3], 1);
        assert_eq!(grid.cells[2][0], 1);
    }

    #[test]
    fn test_scatter_grid_without_complete_pairs() {
        assert!(scatter_grid(&[Some(1.0), None], &[None, Some(2.0)], 4, 3).is_none());
    }

    #[test]
    fn test_render_pair_views_lists_every_pair() {
        let columns = [NumericColumn::Price, NumericColumn::Beds, NumericColumn::Bathrooms];
        let text = render_pair_views(&[], &columns, 4);
        assert!(text.contains("beds vs price: no complete pairs"));
        assert!(text.contains("bathrooms vs price: no complete pairs"));
        assert!(text.contains("bathrooms vs beds: no complete pairs"));
    }
}
