//! Immutable descriptors validated on construction.

mod address;
mod calibration;
mod environment;
mod operation;
mod temperature;

pub use address::Address;
pub use calibration::{Calibration, SensorHealth};
pub use environment::EnvironmentalConditions;
pub use operation::{EquipmentMetrics, MaintenanceSchedule, OperatingRange, WarrantyInfo};
pub use temperature::Temperature;

use crate::error::{DomainError, Result};

/// Reject NaN/inf and anything outside `min..=max`
pub(crate) fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(DomainError::validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(value)
}

pub(crate) fn check_non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} cannot be negative, got {value}"
        )));
    }
    Ok(value)
}

pub(crate) fn check_positive(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(value)
}

pub(crate) fn check_not_blank(field: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}
