use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(f64);

impl Temperature {
    pub fn celsius(value: f64) -> Result<Self> {
        if !value.is_finite() || value < ABSOLUTE_ZERO_C {
            return Err(DomainError::validation(format!(
                "temperature {value} °C is below absolute zero or not a number"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_celsius(&self) -> f64 {
        self.0
    }

    pub fn as_fahrenheit(&self) -> f64 {
        self.0 * 9.0 / 5.0 + 32.0
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} °C", self.0)
    }
}
