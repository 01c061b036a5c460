//! Numeric primitives for score calculation
//!
//! Every function here is pure and total: empty or degenerate input yields a
//! defined zero/identity result instead of an error, because incoming health
//! data is frequently incomplete. Functions that need ordering sort a private
//! copy and never mutate their input.

/// Default Tukey-fence multiplier for outlier removal
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 1.5;

/// Arithmetic mean; 0 for an empty slice
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation (n-1 divisor); 0 for fewer than two values
pub fn standard_deviation(xs: &[f64]) -> f64 {
    if xs.len() <= 1 {
        return 0.0;
    }
    let m = mean(xs);
    let sum_sq: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    (sum_sq / (xs.len() - 1) as f64).sqrt()
}

/// Median of the values; 0 for an empty slice
///
/// Even-length input returns the average of the two middle elements.
pub fn median(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(xs);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// First, second, and third quartile
///
/// Fewer than four values yields `(0, median, 0)`. Q1/Q3 are the sorted
/// elements at index `n/4` and `3n/4` — an index-based estimator, not the
/// interpolated one. Downstream thresholds were tuned against these exact
/// values, so the estimator must stay as is.
pub fn quartiles(xs: &[f64]) -> (f64, f64, f64) {
    if xs.len() < 4 {
        return (0.0, median(xs), 0.0);
    }
    let sorted = sorted_copy(xs);
    let n = sorted.len();
    (sorted[n / 4], median(xs), sorted[3 * n / 4])
}

/// Interquartile range: Q3 - Q1
pub fn interquartile_range(xs: &[f64]) -> f64 {
    let (q1, _, q3) = quartiles(xs);
    q3 - q1
}

/// Linear-interpolated order statistic at percentile `p`; 0 for empty input
///
/// `p` is clamped to [0, 100]. The statistic sits at position
/// `(p/100)·(n-1)` of the sorted values.
pub fn percentile(xs: &[f64], p: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(xs);
    let p = p.clamp(0.0, 100.0);
    let position = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

/// Centered moving average with the window clipped at both ends
///
/// Output length always equals input length; a zero window returns the
/// input unchanged.
pub fn moving_average(xs: &[f64], window_size: usize) -> Vec<f64> {
    if window_size == 0 || xs.is_empty() {
        return xs.to_vec();
    }
    let half = window_size / 2;
    let n = xs.len();
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(n - 1);
            mean(&xs[start..=end])
        })
        .collect()
}

/// Drop values outside the Tukey fence `[Q1 - t*IQR, Q3 + t*IQR]`
///
/// Fewer than four values are returned unchanged: the quartile estimate is
/// meaningless below that and dropping anything would bite new users hardest.
pub fn remove_outliers(xs: &[f64], threshold: f64) -> Vec<f64> {
    if xs.len() < 4 {
        return xs.to_vec();
    }
    let (q1, _, q3) = quartiles(xs);
    let iqr = q3 - q1;
    let lower = q1 - threshold * iqr;
    let upper = q3 + threshold * iqr;
    xs.iter()
        .copied()
        .filter(|&x| x >= lower && x <= upper)
        .collect()
}

fn sorted_copy(xs: &[f64]) -> Vec<f64> {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_mean_empty_and_basic() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[2.0, 4.0, 6.0]) - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_standard_deviation_degenerate() {
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(standard_deviation(&[42.0]), 0.0);
    }

    #[test]
    fn test_standard_deviation_sample_divisor() {
        // Known sample std dev of [2, 4, 4, 4, 5, 5, 7, 9] with n-1 is ~2.138
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((standard_deviation(&xs) - 2.1380899353).abs() < 1e-6);
    }

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_quartiles_small_input() {
        let (q1, q2, q3) = quartiles(&[5.0, 1.0, 3.0]);
        assert_eq!(q1, 0.0);
        assert_eq!(q2, 3.0);
        assert_eq!(q3, 0.0);
    }

    #[test]
    fn test_quartiles_index_based() {
        // Sorted: [1..8], n=8 -> Q1 = sorted[2] = 3, Q3 = sorted[6] = 7
        let xs = [8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let (q1, q2, q3) = quartiles(&xs);
        assert_eq!(q1, 3.0);
        assert_eq!(q2, 4.5);
        assert_eq!(q3, 7.0);
        assert_eq!(interquartile_range(&xs), 4.0);
    }

    #[test]
    fn test_percentile_interpolation() {
        let xs = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&xs, 0.0), 10.0);
        assert_eq!(percentile(&xs, 100.0), 40.0);
        // position = 0.5 * 3 = 1.5 -> halfway between 20 and 30
        assert!((percentile(&xs, 50.0) - 25.0).abs() < EPSILON);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_moving_average_window_behavior() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(moving_average(&xs, 0), xs.to_vec());

        let smoothed = moving_average(&xs, 3);
        assert_eq!(smoothed.len(), xs.len());
        // Interior points average their neighbors
        assert!((smoothed[2] - 3.0).abs() < EPSILON);
        // Edges clip the window
        assert!((smoothed[0] - 1.5).abs() < EPSILON);
        assert!((smoothed[4] - 4.5).abs() < EPSILON);
    }

    #[test]
    fn test_remove_outliers_small_input_unchanged() {
        let xs = [1.0, 100.0, 2.0];
        assert_eq!(remove_outliers(&xs, 1.5), xs.to_vec());
    }

    #[test]
    fn test_remove_outliers_drops_extreme_value() {
        let xs = [50.0, 52.0, 51.0, 49.0, 48.0, 50.0, 51.0, 500.0];
        let cleaned = remove_outliers(&xs, 1.5);
        assert!(!cleaned.contains(&500.0));
        assert_eq!(cleaned.len(), 7);
    }

    #[test]
    fn test_input_not_mutated() {
        let xs = vec![3.0, 1.0, 2.0];
        let _ = median(&xs);
        let _ = quartiles(&xs);
        let _ = percentile(&xs, 75.0);
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }

    // Cross-checks against statrs for the textbook estimators
    mod statrs_crosscheck {
        use super::*;
        use statrs::statistics::Statistics;

        #[test]
        fn test_mean_matches_statrs() {
            let xs = vec![23.1, 45.6, 12.9, 38.4, 29.0, 51.7];
            let expected = Statistics::mean(xs.iter().copied());
            assert!((mean(&xs) - expected).abs() < EPSILON);
        }

        #[test]
        fn test_std_dev_matches_statrs() {
            let xs = vec![23.1, 45.6, 12.9, 38.4, 29.0, 51.7];
            let expected = Statistics::std_dev(xs.iter().copied());
            assert!((standard_deviation(&xs) - expected).abs() < EPSILON);
        }
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_median_within_bounds(xs in prop::collection::vec(-1000.0f64..1000.0, 1..100)) {
            let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let m = median(&xs);
            prop_assert!(min <= m && m <= max);
        }

        #[test]
        fn test_constant_sequence_has_zero_std_dev(
            value in -1000.0f64..1000.0,
            len in 2usize..50
        ) {
            let xs = vec![value; len];
            prop_assert!(standard_deviation(&xs).abs() < 1e-9);
        }

        #[test]
        fn test_moving_average_preserves_length(
            xs in prop::collection::vec(-1000.0f64..1000.0, 0..100),
            window in 1usize..20
        ) {
            prop_assert_eq!(moving_average(&xs, window).len(), xs.len());
        }

        #[test]
        fn test_remove_outliers_never_grows(
            xs in prop::collection::vec(-1000.0f64..1000.0, 0..100),
        ) {
            let cleaned = remove_outliers(&xs, 1.5);
            prop_assert!(cleaned.len() <= xs.len());
            if xs.len() < 4 {
                prop_assert_eq!(cleaned, xs);
            }
        }
    }
}
