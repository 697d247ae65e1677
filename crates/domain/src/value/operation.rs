use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Temperature, check_non_negative, check_not_blank, check_range};
use crate::error::{DomainError, Result};

/// Allowed operating band of a piece of equipment (e.g. °C)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingRange {
    min: f64,
    max: f64,
}

impl OperatingRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(DomainError::validation(format!(
                "operating range [{min}, {max}] is invalid"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Manufacturer warranty coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyInfo {
    provider: String,
    starts: DateTime<Utc>,
    expires: DateTime<Utc>,
}

impl WarrantyInfo {
    pub fn new(
        provider: impl Into<String>,
        starts: DateTime<Utc>,
        expires: DateTime<Utc>,
    ) -> Result<Self> {
        if expires < starts {
            return Err(DomainError::validation(
                "warranty cannot expire before it starts",
            ));
        }
        Ok(Self {
            provider: check_not_blank("warranty provider", provider)?,
            starts,
            expires,
        })
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.starts && at <= self.expires
    }
}

/// Operational metrics snapshot of a piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentMetrics {
    efficiency: f64,
    uptime_hours: f64,
    energy_consumed_kwh: f64,
    operating_temperature: Option<Temperature>,
}

impl EquipmentMetrics {
    pub fn new(efficiency: f64, uptime_hours: f64, energy_consumed_kwh: f64) -> Result<Self> {
        Ok(Self {
            efficiency: check_range("efficiency", efficiency, 0.0, 100.0)?,
            uptime_hours: check_non_negative("uptime", uptime_hours)?,
            energy_consumed_kwh: check_non_negative("energy consumed", energy_consumed_kwh)?,
            operating_temperature: None,
        })
    }

    pub fn with_operating_temperature(mut self, temperature: Temperature) -> Self {
        self.operating_temperature = Some(temperature);
        self
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn uptime_hours(&self) -> f64 {
        self.uptime_hours
    }

    pub fn energy_consumed_kwh(&self) -> f64 {
        self.energy_consumed_kwh
    }

    pub fn operating_temperature(&self) -> Option<Temperature> {
        self.operating_temperature
    }
}

impl Default for EquipmentMetrics {
    fn default() -> Self {
        Self {
            efficiency: 100.0,
            uptime_hours: 0.0,
            energy_consumed_kwh: 0.0,
            operating_temperature: None,
        }
    }
}

/// Next planned maintenance for a piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    scheduled_for: DateTime<Utc>,
    description: String,
    recurrence: Option<Duration>,
}

impl MaintenanceSchedule {
    pub fn new(scheduled_for: DateTime<Utc>, description: impl Into<String>) -> Result<Self> {
        Ok(Self {
            scheduled_for,
            description: check_not_blank("maintenance description", description)?,
            recurrence: None,
        })
    }

    pub fn with_recurrence(mut self, every: Duration) -> Result<Self> {
        if every <= Duration::zero() {
            return Err(DomainError::validation(
                "maintenance recurrence must be positive",
            ));
        }
        self.recurrence = Some(every);
        Ok(self)
    }

    pub fn scheduled_for(&self) -> DateTime<Utc> {
        self.scheduled_for
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn recurrence(&self) -> Option<Duration> {
        self.recurrence
    }

    pub fn is_due_at(&self, at: DateTime<Utc>) -> bool {
        self.scheduled_for <= at
    }
}
