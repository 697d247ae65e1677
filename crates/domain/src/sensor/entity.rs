use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{SensorReading, SensorStatus, SensorType};
use crate::error::{DomainError, Result};
use crate::ids::SensorId;
use crate::value::{Calibration, SensorHealth, check_not_blank};

/// Accuracy lost per day since the last calibration, in percentage points
pub const ACCURACY_DECAY_PER_DAY: f64 = 0.1;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A sensor installed in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    id: SensorId,
    name: String,
    model: String,
    manufacturer: String,
    sensor_type: SensorType,
    status: SensorStatus,
    calibration: Calibration,
    health: SensorHealth,
    reading_frequency: Duration,
}

impl Sensor {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        manufacturer: impl Into<String>,
        sensor_type: SensorType,
        calibration: Calibration,
        reading_frequency: Duration,
    ) -> Result<Self> {
        if reading_frequency.is_zero() {
            return Err(DomainError::validation(
                "reading frequency must be positive",
            ));
        }
        Ok(Self {
            id: SensorId::new(),
            name: check_not_blank("sensor name", name)?,
            model: check_not_blank("sensor model", model)?,
            manufacturer: check_not_blank("sensor manufacturer", manufacturer)?,
            sensor_type,
            status: SensorStatus::default(),
            calibration,
            health: SensorHealth::nominal(),
            reading_frequency,
        })
    }

    // Getters
    pub fn id(&self) -> SensorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn health(&self) -> SensorHealth {
        self.health
    }

    pub fn reading_frequency(&self) -> Duration {
        self.reading_frequency
    }

    /// Apply a new correction value; resets the calibration clock to `date`
    pub fn calibrate(&self, value: f64, date: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            calibration: self.calibration.recalibrated(value, date)?,
            ..self.clone()
        })
    }

    pub fn update_health(&self, health: SensorHealth) -> Self {
        Self {
            health,
            ..self.clone()
        }
    }

    pub fn set_status(&self, status: SensorStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn days_since_calibration(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = (now - self.calibration.last_calibrated()).num_seconds().max(0);
        elapsed as f64 / SECONDS_PER_DAY
    }

    /// Calibration accuracy after linear decay, clamped to `0..=100`
    pub fn base_accuracy_at(&self, now: DateTime<Utc>) -> f64 {
        let decayed =
            self.calibration.accuracy() - ACCURACY_DECAY_PER_DAY * self.days_since_calibration(now);
        decayed.clamp(0.0, 100.0)
    }

    pub fn current_accuracy_at(&self, now: DateTime<Utc>) -> f64 {
        self.base_accuracy_at(now)
            * (self.health.accuracy() / 100.0)
            * (self.health.signal_strength() / 100.0)
    }

    pub fn current_accuracy(&self) -> f64 {
        self.current_accuracy_at(Utc::now())
    }

    pub fn requires_calibration_at(&self, now: DateTime<Utc>) -> bool {
        now - self.calibration.last_calibrated() >= self.calibration.interval()
    }

    pub fn requires_calibration(&self) -> bool {
        self.requires_calibration_at(Utc::now())
    }

    /// Turn a raw measurement into a calibrated reading
    pub fn reading_from_raw(&self, raw: f64, at: DateTime<Utc>) -> Result<SensorReading> {
        if !self.status.can_read() {
            return Err(DomainError::NotOperational(self.status.to_string()));
        }
        if !raw.is_finite() {
            return Err(DomainError::validation(format!(
                "raw reading {raw} is not a number"
            )));
        }
        Ok(SensorReading {
            sensor_id: self.id,
            sensor_type: self.sensor_type,
            value: raw * self.calibration.value(),
            accuracy: self.current_accuracy_at(at),
            timestamp: at,
        })
    }

    /// Simulate a reading within the sensor type's range
    ///
    /// Randomness comes from the caller so that runs can be seeded.
    pub fn take_reading<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SensorReading> {
        if !self.status.can_read() {
            return Err(DomainError::NotOperational(self.status.to_string()));
        }
        let (min, max) = self.sensor_type.simulated_range();
        let raw = rng.gen_range(min..=max);
        self.reading_from_raw(raw, Utc::now())
    }
}
