use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{check_positive, check_range};
use crate::error::{DomainError, Result};

/// Calibration state of a sensor
///
/// `value` is a multiplicative correction applied to raw readings and
/// `accuracy` is the percentage accuracy right after calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    value: f64,
    accuracy: f64,
    interval: Duration,
    last_calibrated: DateTime<Utc>,
}

impl Calibration {
    pub fn new(
        value: f64,
        accuracy: f64,
        interval: Duration,
        last_calibrated: DateTime<Utc>,
    ) -> Result<Self> {
        if interval <= Duration::zero() {
            return Err(DomainError::validation(
                "calibration interval must be positive",
            ));
        }
        Ok(Self {
            value: check_positive("calibration value", value)?,
            accuracy: check_range("calibration accuracy", accuracy, 0.0, 100.0)?,
            interval,
            last_calibrated,
        })
    }

    /// Same calibration with a new correction value applied at `date`
    pub(crate) fn recalibrated(&self, value: f64, date: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            value: check_positive("calibration value", value)?,
            last_calibrated: date,
            ..self.clone()
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_calibrated(&self) -> DateTime<Utc> {
        self.last_calibrated
    }
}

/// Health snapshot of a sensor, both fields in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorHealth {
    accuracy: f64,
    signal_strength: f64,
}

impl SensorHealth {
    pub fn new(accuracy: f64, signal_strength: f64) -> Result<Self> {
        Ok(Self {
            accuracy: check_range("health accuracy", accuracy, 0.0, 100.0)?,
            signal_strength: check_range("signal strength", signal_strength, 0.0, 100.0)?,
        })
    }

    /// Fully healthy sensor
    pub fn nominal() -> Self {
        Self {
            accuracy: 100.0,
            signal_strength: 100.0,
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn signal_strength(&self) -> f64 {
        self.signal_strength
    }
}

impl Default for SensorHealth {
    fn default() -> Self {
        Self::nominal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_validation() {
        let now = Utc::now();
        assert!(Calibration::new(1.0, 98.0, Duration::days(30), now).is_ok());
        assert!(Calibration::new(0.0, 98.0, Duration::days(30), now).is_err());
        assert!(Calibration::new(1.0, 101.0, Duration::days(30), now).is_err());
        assert!(Calibration::new(1.0, 98.0, Duration::zero(), now).is_err());
    }

    #[test]
    fn test_recalibration_keeps_accuracy_and_interval() {
        let then = Utc::now() - Duration::days(10);
        let calibration = Calibration::new(1.0, 95.0, Duration::days(30), then).unwrap();
        let now = Utc::now();
        let next = calibration.recalibrated(1.05, now).unwrap();

        assert_eq!(next.value(), 1.05);
        assert_eq!(next.accuracy(), 95.0);
        assert_eq!(next.interval(), Duration::days(30));
        assert_eq!(next.last_calibrated(), now);
        assert_eq!(calibration.last_calibrated(), then);
    }

    #[test]
    fn test_health_bounds() {
        assert!(SensorHealth::new(50.0, 100.0).is_ok());
        assert!(SensorHealth::new(-1.0, 100.0).is_err());
        assert!(SensorHealth::new(50.0, 100.5).is_err());
    }
}
