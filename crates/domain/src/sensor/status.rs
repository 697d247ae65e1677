use serde::{Deserialize, Serialize};

/// Operational status of a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorStatus {
    Operational,
    Calibration,
    Failed,
    Offline,
    Maintenance,
}

impl SensorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Calibration => "Calibration",
            Self::Failed => "Failed",
            Self::Offline => "Offline",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn can_read(&self) -> bool {
        matches!(self, Self::Operational)
    }
}

impl Default for SensorStatus {
    fn default() -> Self {
        Self::Operational
    }
}

impl std::fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
