use serde::{Deserialize, Serialize};

/// Operational status of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentStatus {
    /// Running normally
    Operational,
    /// Taken out of service for maintenance
    Maintenance,
    /// Broken down
    Failed,
    /// Powered off or unreachable
    Offline,
    /// Permanently retired, terminal
    Decommissioned,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 5] = [
        Self::Operational,
        Self::Maintenance,
        Self::Failed,
        Self::Offline,
        Self::Decommissioned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Maintenance => "Maintenance",
            Self::Failed => "Failed",
            Self::Offline => "Offline",
            Self::Decommissioned => "Decommissioned",
        }
    }

    /// Legal edges of the status state machine
    pub fn can_transition_to(&self, next: EquipmentStatus) -> bool {
        use EquipmentStatus::*;
        matches!(
            (self, next),
            (Operational, Maintenance | Failed | Offline)
                | (Maintenance, Operational)
                | (Failed, Maintenance | Offline)
                | (Offline, Operational | Failed)
        )
    }
}

impl Default for EquipmentStatus {
    fn default() -> Self {
        Self::Operational
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
