use serde::{Deserialize, Serialize};

/// Lifecycle status of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingStatus {
    Operational,
    /// Structural changes are locked
    Maintenance,
    Emergency,
    Decommissioned,
}

impl BuildingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Maintenance => "Maintenance",
            Self::Emergency => "Emergency",
            Self::Decommissioned => "Decommissioned",
        }
    }

    pub fn allows_structural_changes(&self) -> bool {
        !matches!(self, Self::Maintenance)
    }
}

impl Default for BuildingStatus {
    fn default() -> Self {
        Self::Operational
    }
}

impl std::fmt::Display for BuildingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
