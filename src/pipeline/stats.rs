//! Descriptive statistics over nullable numeric columns

use std::cmp::Ordering;

/// Non-null values of a column, sorted ascending. NaN is dropped.
pub fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    present
}

/// Quantile with linear interpolation between order statistics.
pub fn quantile_sorted(sorted: &[f64], quantile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = quantile.clamp(0.0, 1.0) * (sorted.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() as f64 - 1.0)).sqrt())
}

/// Tukey's five-number summary: minimum, lower hinge, median, upper hinge, maximum.
///
/// Hinges are the medians of each half, the middle value shared by both
/// halves when the count is odd.
pub fn five_number_summary(sorted: &[f64]) -> Option<[f64; 5]> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let n4 = ((n as f64 + 3.0) / 2.0).floor() / 2.0;
    let depths = [
        1.0,
        n4,
        (n as f64 + 1.0) / 2.0,
        n as f64 + 1.0 - n4,
        n as f64,
    ];
    let mut summary = [0.0; 5];
    for (slot, depth) in summary.iter_mut().zip(depths) {
        let lo = depth.floor() as usize - 1;
        let hi = depth.ceil() as usize - 1;
        *slot = 0.5 * (sorted[lo] + sorted[hi]);
    }
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&v, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&v, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&v, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&v, 1.0), Some(4.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_five_number_summary_odd() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert_eq!(five_number_summary(&v), Some([1.0, 2.5, 4.0, 5.5, 7.0]));
    }

    #[test]
    fn test_five_number_summary_even() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(five_number_summary(&v), Some([1.0, 2.0, 3.5, 5.0, 6.0]));
    }

    #[test]
    fn test_five_number_summary_single() {
        assert_eq!(five_number_summary(&[4.2]), Some([4.2; 5]));
        assert_eq!(five_number_summary(&[]), None);
    }

    #[test]
    fn test_sorted_present_drops_nulls() {
        let v = [Some(3.0), None, Some(1.0), Some(f64::NAN), Some(2.0)];
        assert_eq!(sorted_present(&v), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sample_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let s = sample_std(&v).unwrap();
        assert!((s - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(sample_std(&[1.0]), None);
    }
}
