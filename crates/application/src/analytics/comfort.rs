use domain::telemetry::EnvironmentalReading;
use domain::value::EnvironmentalConditions;
use infrastructure::config::ComfortConfig;

pub fn is_comfortable(conditions: &EnvironmentalConditions, band: &ComfortConfig) -> bool {
    let temperature = conditions.temperature().as_celsius();
    (band.temperature_min_c..=band.temperature_max_c).contains(&temperature)
        && (band.humidity_min..=band.humidity_max).contains(&conditions.humidity())
        && conditions.co2_ppm() <= band.co2_max_ppm
}

/// Share of readings inside the comfort band, in percent
pub fn comfort_score(readings: &[EnvironmentalReading], band: &ComfortConfig) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }
    let comfortable = readings
        .iter()
        .filter(|r| is_comfortable(&r.conditions, band))
        .count();
    Some(comfortable as f64 / readings.len() as f64 * 100.0)
}
