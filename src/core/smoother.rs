use crate::config::toml_config::SmoothingConfig;

/// Window length for a span of `days_span` days.
pub fn window_for_span(days_span: usize, config: &SmoothingConfig) -> usize {
    (days_span / config.days_per_step).clamp(config.min_window, config.max_window)
}

/// Centered moving average whose window shrinks at the edges instead of padding.
///
/// Each output `i` is the mean of `data[i - half..=i + half]` clipped to the
/// slice, with `half = window / 2`. Windows below 2 return a copy of the input.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    if window < 2 {
        return data.to_vec();
    }

    let n = data.len();
    let half = window / 2;

    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(n - 1);
            let slice = &data[start..=end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Moving average over integer day counts.
pub fn smooth_counts(counts: &[u32], window: usize) -> Vec<f64> {
    let values: Vec<f64> = counts.iter().map(|&c| f64::from(c)).collect();
    moving_average(&values, window)
}
