use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SensorType;
use crate::ids::SensorId;

/// A single calibrated measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: SensorId,
    pub sensor_type: SensorType,
    /// Calibrated value in the sensor type's unit
    pub value: f64,
    /// Accuracy in percent at the time of the reading
    pub accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

impl SensorReading {
    pub fn unit(&self) -> &'static str {
        self.sensor_type.unit()
    }
}
