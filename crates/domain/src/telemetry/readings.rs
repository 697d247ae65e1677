use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::{EnvironmentalConditions, EquipmentMetrics};

/// Energy consumed during one collection bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub timestamp: DateTime<Utc>,
    pub kwh: f64,
}

impl EnergyReading {
    pub fn new(timestamp: DateTime<Utc>, kwh: f64) -> Self {
        Self { timestamp, kwh }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub timestamp: DateTime<Utc>,
    pub conditions: EnvironmentalConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalReading {
    pub timestamp: DateTime<Utc>,
    pub metrics: EquipmentMetrics,
}
