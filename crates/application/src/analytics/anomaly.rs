use chrono::{DateTime, Utc};
use domain::telemetry::EnergyReading;
use infrastructure::config::AnomalyConfig;
use serde::{Deserialize, Serialize};

use super::statistics::{mean, std_dev};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyDirection {
    High,
    Low,
}

impl AnomalyDirection {
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "High consumption",
            Self::Low => "Low consumption",
        }
    }
}

/// A reading that strays too far from the series mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionAnomaly {
    pub timestamp: DateTime<Utc>,
    /// Mean of the analysed series
    pub expected: f64,
    pub actual: f64,
    /// `|actual - expected| / expected * 100`, absent when the mean is zero
    pub deviation_percent: Option<f64>,
    pub direction: AnomalyDirection,
}

impl ConsumptionAnomaly {
    pub fn description(&self) -> &'static str {
        self.direction.description()
    }
}

/// Flag readings whose distance from the mean exceeds `threshold` standard deviations
///
/// The comparison is strict: a reading sitting exactly on the boundary is not
/// flagged. Returns nothing when detection is disabled or the series is
/// shorter than `min_points`.
pub fn detect_consumption_anomalies(
    readings: &[EnergyReading],
    settings: &AnomalyConfig,
) -> Vec<ConsumptionAnomaly> {
    if !settings.enabled || readings.len() < settings.min_points {
        return Vec::new();
    }

    let values: Vec<f64> = readings.iter().map(|r| r.kwh).collect();
    let (Some(mean), Some(std_dev)) = (mean(&values), std_dev(&values)) else {
        return Vec::new();
    };
    let limit = settings.threshold * std_dev;

    readings
        .iter()
        .filter(|r| (r.kwh - mean).abs() > limit)
        .map(|r| ConsumptionAnomaly {
            timestamp: r.timestamp,
            expected: mean,
            actual: r.kwh,
            deviation_percent: (mean != 0.0).then(|| (r.kwh - mean).abs() / mean * 100.0),
            direction: if r.kwh > mean {
                AnomalyDirection::High
            } else {
                AnomalyDirection::Low
            },
        })
        .collect()
}
