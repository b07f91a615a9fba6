use serde::Serialize;

/// Number of bins used for the max-queue histogram.
pub const HISTOGRAM_BINS: usize = 20;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub range_label: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Splits `data` into `bins` contiguous buckets spanning `[min, max]`.
///
/// - Each bucket is half-open `[lower, upper)`, except the last one which is
///   closed so that the maximum sample is counted.
/// - If every sample has the same value the width is zero and all samples
///   land in the first bucket.
/// - Empty input or `bins == 0` => empty vector.
pub fn bin_samples(data: &[f64], bins: usize) -> Vec<HistogramBin> {
    if data.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min_value = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_value = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let bin_width = (max_value - min_value) / bins as f64;

    let edge = |index: usize| -> f64 {
        if index == bins {
            max_value
        } else {
            min_value + index as f64 * bin_width
        }
    };

    (0..bins)
        .map(|index| {
            let lower = edge(index);
            let upper = edge(index + 1);
            let is_last = index + 1 == bins;
            let count = if bin_width == 0.0 {
                if index == 0 { data.len() } else { 0 }
            } else {
                data.iter()
                    .filter(|value| {
                        **value >= lower && (**value < upper || (is_last && **value <= upper))
                    })
                    .count()
            };
            HistogramBin {
                range_label: format!("{}-{}", lower.round() as i64, upper.round() as i64),
                lower,
                upper,
                count,
            }
        })
        .collect()
}
