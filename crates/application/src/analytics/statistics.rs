//! Descriptive statistics over plain `f64` series.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`)
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Ordinary least-squares slope with the sample index as `x`
///
/// Works on centred values. `None` for fewer than two points.
pub fn linear_regression_slope(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let mean_x = (values.len() - 1) as f64 / 2.0;
    let mean_y = mean(values)?;
    let (covariance, variance) =
        values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(cov, var), (i, y)| {
                let dx = i as f64 - mean_x;
                (cov + dx * (y - mean_y), var + dx * dx)
            });
    Some(covariance / variance)
}
