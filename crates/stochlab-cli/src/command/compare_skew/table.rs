//! Summary table and text histogram display
//!
//! Values are printed with a fixed number of decimals so the columns of the
//! three datasets line up.

use stochlab_stats::{descriptive::SkewDirection, histogram::Histogram};

use super::DatasetSummary;

const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Print the summary table header
pub(super) fn print_summary_header() {
    println!(
        "  {:<14} {:>9} {:>9} {:>10} {:>9} {:>9} {:>9} {:>19} {:>9} {:>9}",
        "Dataset",
        "Mean",
        "Median",
        "Mean-Med",
        "Skewness",
        "Q1",
        "Q3",
        "Whiskers",
        "Outliers",
        "Shape",
    );
    // label(14) + 6 * value(9) + mean-med(10) + whiskers(19) + shape(9) + spaces(9)
    println!("  {}", "-".repeat(115));
}

/// Print a single dataset row
pub(super) fn print_summary_row(summary: &DatasetSummary, precision: usize) {
    let stats = &summary.stats.stats;
    let box_plot = &summary.stats.box_plot;
    let whiskers = format!(
        "{:.precision$}..{:.precision$}",
        box_plot.lower_whisker, box_plot.upper_whisker
    );
    let shape = match summary.skew_direction {
        SkewDirection::Left => "left",
        SkewDirection::Symmetric => "symmetric",
        SkewDirection::Right => "right",
    };
    println!(
        "  {:<14} {:>9.precision$} {:>9.precision$} {:>+10.precision$} {:>+9.precision$} {:>9.precision$} {:>9.precision$} {:>19} {:>9} {:>9}",
        summary.dataset.title(),
        stats.mean,
        stats.median,
        stats.mean - stats.median,
        stats.skewness,
        box_plot.q1,
        box_plot.q3,
        whiskers,
        box_plot.outliers.len(),
        shape,
    );
}

/// Print a histogram as horizontal bars scaled to the largest bin
pub(super) fn print_histogram(histogram: &Histogram, precision: usize) {
    let max_count = histogram.max_count().max(1);
    let last = histogram.bins.len().saturating_sub(1);
    for (i, bin) in histogram.bins.iter().enumerate() {
        let close = if i == last { ']' } else { ')' };
        let bar_len = usize::try_from(bin.count * HISTOGRAM_BAR_WIDTH as u64 / max_count).unwrap_or(0);
        println!(
            "  [{:>8.precision$}, {:>8.precision$}{close} {:<width$} {}",
            bin.range.start,
            bin.range.end,
            "#".repeat(bar_len),
            bin.count,
            width = HISTOGRAM_BAR_WIDTH,
        );
    }
}
