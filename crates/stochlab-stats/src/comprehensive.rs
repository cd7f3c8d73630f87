use serde::Serialize;

use crate::{
    box_plot::{BoxPlotSummary, DEFAULT_WHISKER_FACTOR},
    descriptive::DescriptiveStats,
    histogram::Histogram,
    percentiles::Percentiles,
};

/// Comprehensive statistical analysis combining multiple measures.
///
/// This structure provides a complete statistical overview of a dataset by combining:
/// - Basic descriptive statistics (mean, median, variance, skewness, etc.)
/// - Percentile values for quantile analysis
/// - Histogram for distribution visualization
/// - Box-plot summary with the conventional 1.5 × IQR whiskers
///
/// # Examples
///
/// ```
/// use stochlab_stats::comprehensive::ComprehensiveStats;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let stats = ComprehensiveStats::new(
///     values,
///     &[25.0, 50.0, 75.0], // Percentiles to compute
///     5,                   // Number of histogram bins
/// )
/// .unwrap();
///
/// assert_eq!(stats.stats.mean, 5.5);
/// assert_eq!(stats.percentiles.get(50.0), Some(5.5));
/// assert_eq!(stats.histogram.total_count(), 10);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ComprehensiveStats {
    /// Basic descriptive statistics for the dataset.
    pub stats: DescriptiveStats,
    /// Precomputed percentile values for quick lookup.
    pub percentiles: Percentiles,
    /// Histogram showing the distribution of values across bins.
    pub histogram: Histogram,
    /// Quartiles, whiskers and outliers.
    pub box_plot: BoxPlotSummary,
}

impl ComprehensiveStats {
    /// Computes comprehensive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing all statistics.
    /// NaN values are skipped.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to analyze
    /// * `percentile_points` - The percentile points to compute (e.g., [25.0, 50.0, 75.0])
    /// * `hist_num_bins` - The number of equal-width histogram bins
    ///
    /// # Returns
    ///
    /// * `Some(ComprehensiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    #[must_use]
    pub fn new<I>(values: I, percentile_points: &[f64], hist_num_bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points, hist_num_bins)
    }

    /// Computes comprehensive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(
        sorted_values: &[f64],
        percentile_points: &[f64],
        hist_num_bins: usize,
    ) -> Option<Self> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let percentiles = Percentiles::from_sorted(sorted_values, percentile_points);
        let histogram = Histogram::new(sorted_values.iter().copied(), hist_num_bins, None, None);
        let box_plot = BoxPlotSummary::from_sorted(sorted_values, DEFAULT_WHISKER_FACTOR)?;

        Some(Self {
            stats,
            percentiles,
            histogram,
            box_plot,
        })
    }
}
