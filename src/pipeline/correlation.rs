//! Pearson correlation over complete observations

use faer::Mat;
use rayon::prelude::*;

use crate::pipeline::{EnrichedListing, NumericColumn};

/// A pair of columns and their correlation
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedPair {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
}

/// Square correlation matrix with its column labels.
///
/// Entries involving a constant column (or fewer than two complete rows)
/// are `NaN`.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
    /// Rows with no missing value among `columns`
    pub complete_rows: usize,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Off-diagonal pairs sorted by absolute correlation descending. NaN entries are skipped.
    pub fn strongest_pairs(&self, limit: usize) -> Vec<CorrelatedPair> {
        let n = self.columns.len();
        let mut pairs = Vec::new();

        // Extract upper triangle
        for i in 0..n {
            for j in (i + 1)..n {
                let corr = self.values[i][j];
                if !corr.is_nan() {
                    pairs.push(CorrelatedPair {
                        feature1: self.columns[i].clone(),
                        feature2: self.columns[j].clone(),
                        correlation: corr,
                    });
                }
            }
        }

        pairs.sort_by(|a, b| {
            b.correlation
                .abs()
                .partial_cmp(&a.correlation.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs.truncate(limit);
        pairs
    }
}

/// Correlation matrix of the selected listing columns, complete observations only.
pub fn correlation_matrix(rows: &[EnrichedListing], columns: &[NumericColumn]) -> CorrelationMatrix {
    let names = columns.iter().map(|c| c.name().to_string()).collect();
    let data: Vec<Vec<Option<f64>>> = columns.iter().map(|c| c.values(rows)).collect();
    complete_case_correlation(names, &data)
}

/// Compute a Pearson correlation matrix using only rows where every column is present.
///
/// Algorithm:
/// 1. Keep rows with no null (or NaN) across all columns
/// 2. Standardize each column over those rows: Z = (X - mean) / (std * sqrt(n))
/// 3. R = Z^T * Z
pub fn complete_case_correlation(names: Vec<String>, data: &[Vec<Option<f64>>]) -> CorrelationMatrix {
    let n_cols = data.len();
    let n_rows = data.first().map(|c| c.len()).unwrap_or(0);

    let complete: Vec<usize> = (0..n_rows)
        .filter(|&row| {
            data.iter()
                .all(|col| matches!(col.get(row), Some(Some(v)) if !v.is_nan()))
        })
        .collect();
    let n = complete.len();

    // Standardize each column independently; None marks a degenerate column
    let standardized: Vec<Option<Vec<f64>>> = data
        .par_iter()
        .map(|col| {
            if n < 2 {
                return None;
            }
            let values: Vec<f64> = complete.iter().filter_map(|&row| col[row]).collect();
            let mean = values.iter().sum::<f64>() / n as f64;
            let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
            let std = var.sqrt();
            if std == 0.0 {
                return None; // Constant column
            }
            let scale = std * (n as f64).sqrt();
            Some(values.iter().map(|x| (x - mean) / scale).collect())
        })
        .collect();

    let mut z = Mat::<f64>::zeros(n, n_cols);
    for (col_idx, col_data) in standardized.iter().enumerate() {
        if let Some(col_data) = col_data {
            for (row_idx, &val) in col_data.iter().enumerate() {
                z[(row_idx, col_idx)] = val;
            }
        }
    }

    let product = z.transpose() * &z;

    let values = (0..n_cols)
        .map(|i| {
            (0..n_cols)
                .map(|j| {
                    if standardized[i].is_none() || standardized[j].is_none() {
                        f64::NAN
                    } else if i == j {
                        1.0
                    } else {
                        product[(i, j)].clamp(-1.0, 1.0)
                    }
                })
                .collect()
        })
        .collect();

    CorrelationMatrix {
        columns: names,
        values,
        complete_rows: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let data = vec![
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
            vec![Some(2.0), Some(4.0), Some(6.0), Some(8.0)],
            vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0)],
        ];
        let m = complete_case_correlation(names(&["a", "b", "c"]), &data);
        assert_eq!(m.complete_rows, 4);
        assert!((m.get("a", "b").unwrap() - 1.0).abs() < 1e-9);
        assert!((m.get("a", "c").unwrap() + 1.0).abs() < 1e-9);
        assert_eq!(m.get("b", "b"), Some(1.0));
    }

    #[test]
    fn test_rows_with_any_null_are_dropped() {
        // The outlier row is incomplete in c, so it must not affect a-b either
        let data = vec![
            vec![Some(1.0), Some(2.0), Some(3.0), Some(100.0)],
            vec![Some(1.0), Some(2.0), Some(3.0), Some(-100.0)],
            vec![Some(5.0), Some(1.0), Some(3.0), None],
        ];
        let m = complete_case_correlation(names(&["a", "b", "c"]), &data);
        assert_eq!(m.complete_rows, 3);
        assert!((m.get("a", "b").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_column_is_nan() {
        let data = vec![
            vec![Some(1.0), Some(2.0), Some(3.0)],
            vec![Some(7.0), Some(7.0), Some(7.0)],
        ];
        let m = complete_case_correlation(names(&["a", "k"]), &data);
        assert!(m.get("a", "k").unwrap().is_nan());
        assert!(m.get("k", "k").unwrap().is_nan());
        assert_eq!(m.get("a", "a"), Some(1.0));
        assert!(m.strongest_pairs(10).is_empty());
    }

    #[test]
    fn test_strongest_pairs_sorted_by_magnitude() {
        let data = vec![
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)],
            vec![Some(5.0), Some(4.0), Some(3.0), Some(2.0), Some(1.0)],
            vec![Some(2.0), Some(1.0), Some(4.0), Some(3.0), Some(5.0)],
        ];
        let m = complete_case_correlation(names(&["a", "b", "c"]), &data);
        let pairs = m.strongest_pairs(2);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].feature1, "a");
        assert_eq!(pairs[0].feature2, "b");
        assert!(pairs[0].correlation.abs() >= pairs[1].correlation.abs());
    }
}
