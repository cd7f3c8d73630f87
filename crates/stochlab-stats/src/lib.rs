//! Sample statistics for the stochlab toolkit.
//!
//! This crate provides a collection of statistical tools including:
//!
//! - **Descriptive statistics**: mean, median, variance, standard deviation and skewness
//! - **Percentiles**: linearly interpolated percentile values
//! - **Histogram generation**: equal-width frequency distributions
//! - **Box plots**: quartiles, whiskers and outliers
//! - **Comprehensive statistics**: all of the above in one pass
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`box_plot`]: Five-number summaries with outlier detection
//! - [`comprehensive`]: Comprehensive statistical analysis combining multiple measures
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use stochlab_stats::descriptive::{DescriptiveStats, SkewDirection};
//!
//! let values = [1.0, 2.0, 2.0, 3.0, 12.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 4.0);
//! assert_eq!(stats.median, 2.0);
//! assert_eq!(stats.skew_direction(0.1), SkewDirection::Right);
//! ```
//!
//! ## Summarizing a box plot
//!
//! ```
//! use stochlab_stats::box_plot::{BoxPlotSummary, DEFAULT_WHISKER_FACTOR};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
//! let summary = BoxPlotSummary::new(values, DEFAULT_WHISKER_FACTOR).unwrap();
//! assert_eq!(summary.outliers, vec![100.0]);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use stochlab_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(values, 5, None, None);
//! assert_eq!(histogram.max_count(), 2);
//! ```

pub mod box_plot;
pub mod comprehensive;
pub mod descriptive;
pub mod histogram;
pub mod percentiles;
