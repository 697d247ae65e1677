use super::statistics::{linear_regression_slope, mean};

/// Percentage change over the observed period from a least-squares fit
///
/// Computed as `slope * (n - 1) / mean * 100`. Fewer than two points or a
/// constant series give a flat trend of `0.0`; a series averaging zero has no
/// defined trend and yields `None`.
pub fn calculate_consumption_trend(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return Some(0.0);
    }

    let mean = mean(values)?;
    if mean == 0.0 || !mean.is_finite() {
        return None;
    }

    if values.iter().all(|v| *v == values[0]) {
        return Some(0.0);
    }

    let slope = linear_regression_slope(values)?;
    Some(slope * (values.len() - 1) as f64 / mean * 100.0)
}
