use serde::Serialize;

use crate::percentiles::compute_percentile;

/// Whisker length used by conventional box plots, in multiples of the IQR.
pub const DEFAULT_WHISKER_FACTOR: f64 = 1.5;

/// Five-number summary behind a box-and-whisker plot.
///
/// Quartiles use linear interpolation (see
/// [`compute_percentile`](crate::percentiles::compute_percentile)). Whiskers
/// extend to the most extreme data points within `whisker_factor × IQR` of
/// the box; every point beyond them is an outlier.
#[derive(Debug, Clone, Serialize)]
pub struct BoxPlotSummary {
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// Interquartile range `q3 - q1`.
    pub iqr: f64,
    /// Smallest data point not below `q1 - whisker_factor * iqr`.
    pub lower_whisker: f64,
    /// Largest data point not above `q3 + whisker_factor * iqr`.
    pub upper_whisker: f64,
    /// Data points outside the whiskers, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxPlotSummary {
    /// Computes a box-plot summary from unsorted values.
    ///
    /// NaN values are skipped.
    ///
    /// # Returns
    ///
    /// * `Some(BoxPlotSummary)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use stochlab_stats::box_plot::{BoxPlotSummary, DEFAULT_WHISKER_FACTOR};
    /// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 40.0];
    /// let summary = BoxPlotSummary::new(values, DEFAULT_WHISKER_FACTOR).unwrap();
    /// assert_eq!(summary.median, 5.5);
    /// assert_eq!(summary.upper_whisker, 9.0);
    /// assert_eq!(summary.outliers, vec![40.0]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, whisker_factor: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, whisker_factor)
    }

    /// Computes a box-plot summary from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], whisker_factor: f64) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }

        let q1 = compute_percentile(sorted_values, 25.0);
        let median = compute_percentile(sorted_values, 50.0);
        let q3 = compute_percentile(sorted_values, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - whisker_factor * iqr;
        let upper_fence = q3 + whisker_factor * iqr;

        let inside = |v: &&f64| (lower_fence..=upper_fence).contains(*v);
        // with a small whisker factor no point may lie inside the fences
        let lower_whisker = sorted_values.iter().find(inside).copied().unwrap_or(q1);
        let upper_whisker = sorted_values.iter().rev().find(inside).copied().unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| *v < lower_whisker || *v > upper_whisker)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            iqr,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_empty() {
        assert!(BoxPlotSummary::new(Vec::<f64>::new(), DEFAULT_WHISKER_FACTOR).is_none());
    }

    #[test]
    fn test_quartiles() {
        let summary =
            BoxPlotSummary::new([8.0, 1.0, 7.0, 2.0, 6.0, 3.0, 5.0, 4.0], DEFAULT_WHISKER_FACTOR)
                .unwrap();
        assert_abs_diff_eq!(summary.q1, 2.75);
        assert_abs_diff_eq!(summary.median, 4.5);
        assert_abs_diff_eq!(summary.q3, 6.25);
        assert_abs_diff_eq!(summary.iqr, 3.5);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 8.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_outliers_on_both_sides() {
        let values = [-50.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 90.0];
        let summary = BoxPlotSummary::new(values, DEFAULT_WHISKER_FACTOR).unwrap();
        assert_eq!(summary.lower_whisker, 10.0);
        assert_eq!(summary.upper_whisker, 16.0);
        assert_eq!(summary.outliers, vec![-50.0, 90.0]);
        for outlier in &summary.outliers {
            assert!(*outlier < summary.lower_whisker || *outlier > summary.upper_whisker);
        }
    }

    #[test]
    fn test_constant_values() {
        let summary = BoxPlotSummary::new([2.0; 4], DEFAULT_WHISKER_FACTOR).unwrap();
        assert_eq!(summary.iqr, 0.0);
        assert_eq!(summary.lower_whisker, 2.0);
        assert_eq!(summary.upper_whisker, 2.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_zero_factor_pins_whiskers_to_box() {
        let summary = BoxPlotSummary::new([1.0, 2.0, 3.0, 4.0, 5.0], 0.0).unwrap();
        assert_eq!(summary.lower_whisker, 2.0);
        assert_eq!(summary.upper_whisker, 4.0);
        assert_eq!(summary.outliers, vec![1.0, 5.0]);
    }
}
