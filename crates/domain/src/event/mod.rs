use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod publisher;
pub use publisher::{EventPublisher, PublishError};

use crate::equipment::{EquipmentStatus, EquipmentType};
use crate::ids::{BuildingId, EquipmentId, FloorId, RoomId, SensorId};
use crate::sensor::SensorType;

/// Severity attached to an AlertTriggered event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Immutable record of a change to a building
///
/// Identity and occurrence time are fixed when the event is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    event_id: Uuid,
    building_id: BuildingId,
    occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    kind: EventKind,
}

/// What happened, tagged with a stable `type` discriminator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventKind {
    FloorAdded {
        floor_id: FloorId,
        floor_number: u32,
    },

    FloorRemoved {
        floor_id: FloorId,
        floor_number: u32,
    },

    MaintenanceModeChanged {
        enabled: bool,
    },

    RoomAdded {
        floor_id: FloorId,
        room_id: RoomId,
        room_number: String,
    },

    EquipmentAdded {
        room_id: RoomId,
        equipment_id: EquipmentId,
        equipment_type: EquipmentType,
    },

    SensorAdded {
        room_id: RoomId,
        sensor_id: SensorId,
        sensor_type: SensorType,
    },

    EquipmentStatusChanged {
        equipment_id: EquipmentId,
        from: EquipmentStatus,
        to: EquipmentStatus,
    },

    AlertTriggered {
        source: String,
        severity: AlertSeverity,
        message: String,
    },

    /// Metered consumption attributed to an entity of the building
    EnergyConsumptionRecorded {
        source: String,
        kwh: f64,
    },

    EnvironmentalConditionsUpdated {
        room_id: RoomId,
        temperature_c: f64,
        humidity: f64,
        co2_ppm: f64,
    },
}

impl DomainEvent {
    pub fn new(building_id: BuildingId, kind: EventKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            building_id,
            occurred_at: Utc::now(),
            kind,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn building_id(&self) -> BuildingId {
        self.building_id
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Get the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Get the event type as string
    pub fn event_type(&self) -> &'static str {
        match self.kind {
            EventKind::FloorAdded { .. } => "FloorAdded",
            EventKind::FloorRemoved { .. } => "FloorRemoved",
            EventKind::MaintenanceModeChanged { .. } => "MaintenanceModeChanged",
            EventKind::RoomAdded { .. } => "RoomAdded",
            EventKind::EquipmentAdded { .. } => "EquipmentAdded",
            EventKind::SensorAdded { .. } => "SensorAdded",
            EventKind::EquipmentStatusChanged { .. } => "EquipmentStatusChanged",
            EventKind::AlertTriggered { .. } => "AlertTriggered",
            EventKind::EnergyConsumptionRecorded { .. } => "EnergyConsumptionRecorded",
            EventKind::EnvironmentalConditionsUpdated { .. } => "EnvironmentalConditionsUpdated",
        }
    }

    /// Event payload as a structured map, without the discriminator
    pub fn metadata(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(&self.kind) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.remove("type");
                map
            }
            _ => serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_floor_added_event() {
        let building_id = BuildingId::new();
        let floor_id = FloorId::new();
        let event = DomainEvent::new(
            building_id,
            EventKind::FloorAdded {
                floor_id,
                floor_number: 2,
            },
        );

        assert_eq!(event.event_type(), "FloorAdded");
        assert_eq!(event.building_id(), building_id);
        match event.kind() {
            EventKind::FloorAdded {
                floor_id: id,
                floor_number,
            } => {
                assert_eq!(*id, floor_id);
                assert_eq!(*floor_number, 2);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn test_metadata_excludes_discriminator() {
        let event = DomainEvent::new(
            BuildingId::new(),
            EventKind::AlertTriggered {
                source: "chiller-1".to_string(),
                severity: AlertSeverity::Critical,
                message: "Compressor trip".to_string(),
            },
        );

        let metadata = event.metadata();
        assert!(!metadata.contains_key("type"));
        assert_eq!(metadata["source"], json!("chiller-1"));
        assert_eq!(metadata["severity"], json!("Critical"));
    }

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::new(
            BuildingId::new(),
            EventKind::MaintenanceModeChanged { enabled: true },
        );

        let json_str = serde_json::to_string(&event).unwrap();
        assert!(json_str.contains("\"type\":\"MaintenanceModeChanged\""));
        let deserialized: DomainEvent = serde_json::from_str(&json_str).unwrap();

        assert_eq!(deserialized, event);
        assert_eq!(deserialized.event_type(), "MaintenanceModeChanged");
    }
}
