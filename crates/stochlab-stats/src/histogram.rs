use std::ops::Range;

use serde::Serialize;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range into equal-width bins and counts the
/// frequency of values falling into each bin.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
///
/// Each bin represents a range of values and the count of data points falling within that range.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    ///
    /// The last bin of a histogram also includes its end.
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from.
    /// * `num_bins` - The number of equal-width bins to create.
    /// * `explicit_min` - If provided, overrides the lower bound of the histogram.
    /// * `explicit_max` - If provided, overrides the upper bound of the histogram.
    ///
    /// Values outside `[min, max]` are not counted. NaN values are skipped.
    ///
    /// # Returns
    ///
    /// A `Histogram` with bins populated based on the input values. The
    /// histogram has no bins if `values` is empty or `num_bins` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stochlab_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 3, None, None);
    /// assert_eq!(histogram.bins.len(), 3);
    /// assert_eq!(histogram.total_count(), 10);
    /// assert_eq!(histogram.bins[0].range, 1.0..4.0);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(
        values: I,
        num_bins: usize,
        explicit_min: Option<f64>,
        explicit_max: Option<f64>,
    ) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut min =
            explicit_min.unwrap_or_else(|| values.iter().copied().fold(f64::INFINITY, f64::min));
        let mut max = explicit_max
            .unwrap_or_else(|| values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        if max - min < f64::EPSILON {
            // all values identical: use a unit-wide range centered on the value
            min -= 0.5;
            max += 0.5;
        }

        let bin_width = (max - min) / num_bins as f64;
        // Recompute each boundary from `min` to avoid floating-point accumulation errors
        let edge = |i: usize| {
            if i == num_bins {
                max
            } else {
                min + bin_width * i as f64
            }
        };
        let mut bins = (0..num_bins)
            .map(|i| HistogramBin {
                range: edge(i)..edge(i + 1),
                count: 0,
            })
            .collect::<Vec<_>>();

        for val in values {
            if val < min || val > max {
                continue;
            }
            let idx = (((val - min) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted in the histogram.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// The largest bin count, or zero for an empty histogram.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(Histogram::new(Vec::<f64>::new(), 10, None, None).bins.is_empty());
        assert!(Histogram::new([1.0, 2.0], 0, None, None).bins.is_empty());
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 1.0, 2.0, 3.0, 4.0], 4, None, None);
        let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(histogram.bins[3].range.end, 4.0);
    }

    #[test]
    fn test_explicit_bounds_drop_outside_values() {
        let histogram = Histogram::new([-5.0, 0.5, 1.5, 25.0], 2, Some(0.0), Some(2.0));
        assert_eq!(histogram.total_count(), 2);
        assert_eq!(histogram.max_count(), 1);
    }

    #[test]
    fn test_constant_values() {
        let histogram = Histogram::new([3.0; 5], 3, None, None);
        assert_eq!(histogram.bins.first().unwrap().range.start, 2.5);
        assert_eq!(histogram.bins.last().unwrap().range.end, 3.5);
        assert_eq!(histogram.total_count(), 5);
        assert_eq!(histogram.bins[1].count, 5);
    }

    #[test]
    fn test_nan_is_skipped() {
        let histogram = Histogram::new([1.0, f64::NAN, 2.0], 2, None, None);
        assert_eq!(histogram.total_count(), 2);
    }
}
