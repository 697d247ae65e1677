use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Temperature, check_non_negative, check_range};
use crate::error::Result;

/// Snapshot of a room's indoor climate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    temperature: Temperature,
    humidity: f64,
    co2_ppm: f64,
    light_lux: f64,
    recorded_at: DateTime<Utc>,
}

impl EnvironmentalConditions {
    pub fn new(
        temperature: Temperature,
        humidity: f64,
        co2_ppm: f64,
        light_lux: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            temperature,
            humidity: check_range("relative humidity", humidity, 0.0, 100.0)?,
            co2_ppm: check_non_negative("CO2 concentration", co2_ppm)?,
            light_lux: check_non_negative("illuminance", light_lux)?,
            recorded_at,
        })
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn co2_ppm(&self) -> f64 {
        self.co2_ppm
    }

    pub fn light_lux(&self) -> f64 {
        self.light_lux
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
