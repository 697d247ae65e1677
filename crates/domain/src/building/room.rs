use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::compatibility;
use crate::equipment::Equipment;
use crate::error::{DomainError, Result};
use crate::ids::{EquipmentId, RoomId, SensorId};
use crate::sensor::Sensor;
use crate::value::{EnvironmentalConditions, check_not_blank, check_positive};

/// Usage category of a room, drives device compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Office,
    Conference,
    ServerRoom,
    Kitchen,
    Laboratory,
    Storage,
    Restroom,
    Lobby,
    Mechanical,
    Electrical,
    Custom,
}

impl RoomType {
    pub const ALL: [RoomType; 11] = [
        Self::Office,
        Self::Conference,
        Self::ServerRoom,
        Self::Kitchen,
        Self::Laboratory,
        Self::Storage,
        Self::Restroom,
        Self::Lobby,
        Self::Mechanical,
        Self::Electrical,
        Self::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Conference => "Conference",
            Self::ServerRoom => "ServerRoom",
            Self::Kitchen => "Kitchen",
            Self::Laboratory => "Laboratory",
            Self::Storage => "Storage",
            Self::Restroom => "Restroom",
            Self::Lobby => "Lobby",
            Self::Mechanical => "Mechanical",
            Self::Electrical => "Electrical",
            Self::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A room on a floor, owning its equipment and sensors
///
/// Devices are held behind `Arc` so copies of a room share them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    number: String,
    name: String,
    room_type: RoomType,
    area: f64,
    max_occupancy: u32,
    metadata: Option<serde_json::Value>,
    occupied: bool,
    conditions: Option<EnvironmentalConditions>,
    equipment: Vec<Arc<Equipment>>,
    sensors: Vec<Arc<Sensor>>,
}

impl Room {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        room_type: RoomType,
        area: f64,
        max_occupancy: u32,
    ) -> Result<Self> {
        Ok(Self {
            id: RoomId::new(),
            number: check_not_blank("room number", number)?,
            name: check_not_blank("room name", name)?,
            room_type,
            area: check_positive("room area", area)?,
            max_occupancy,
            metadata: None,
            occupied: false,
            conditions: None,
            equipment: Vec::new(),
            sensors: Vec::new(),
        })
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    // Getters
    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn max_occupancy(&self) -> u32 {
        self.max_occupancy
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn conditions(&self) -> Option<&EnvironmentalConditions> {
        self.conditions.as_ref()
    }

    pub fn equipment(&self) -> impl Iterator<Item = &Equipment> {
        self.equipment.iter().map(Arc::as_ref)
    }

    pub fn sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.iter().map(Arc::as_ref)
    }

    pub fn find_equipment(&self, id: EquipmentId) -> Option<&Equipment> {
        self.equipment().find(|e| e.id() == id)
    }

    pub fn find_sensor(&self, id: SensorId) -> Option<&Sensor> {
        self.sensors().find(|s| s.id() == id)
    }

    pub fn add_equipment(&self, equipment: Equipment) -> Result<Self> {
        if !compatibility::equipment_allowed(self.room_type, equipment.equipment_type()) {
            return Err(DomainError::IncompatibleType {
                room_type: self.room_type.to_string(),
                device: equipment.equipment_type().to_string(),
            });
        }
        if self.find_equipment(equipment.id()).is_some() {
            return Err(DomainError::InvariantViolation(format!(
                "equipment {} is already installed in room {}",
                equipment.id(),
                self.number
            )));
        }

        let mut updated = self.clone();
        updated.equipment.push(Arc::new(equipment));
        Ok(updated)
    }

    pub fn add_sensor(&self, sensor: Sensor) -> Result<Self> {
        if !compatibility::sensor_allowed(self.room_type, sensor.sensor_type()) {
            return Err(DomainError::IncompatibleType {
                room_type: self.room_type.to_string(),
                device: sensor.sensor_type().to_string(),
            });
        }
        if self.find_sensor(sensor.id()).is_some() {
            return Err(DomainError::InvariantViolation(format!(
                "sensor {} is already installed in room {}",
                sensor.id(),
                self.number
            )));
        }

        let mut updated = self.clone();
        updated.sensors.push(Arc::new(sensor));
        Ok(updated)
    }

    /// Swap in a new version of an installed piece of equipment
    pub(crate) fn replace_equipment(&self, equipment: Equipment) -> Result<Self> {
        let index = self
            .equipment
            .iter()
            .position(|e| e.id() == equipment.id())
            .ok_or_else(|| DomainError::not_found("Equipment", equipment.id()))?;

        let mut updated = self.clone();
        updated.equipment[index] = Arc::new(equipment);
        Ok(updated)
    }

    pub fn set_occupied(&self, occupied: bool) -> Self {
        Self {
            occupied,
            ..self.clone()
        }
    }

    pub fn update_environmental_conditions(&self, conditions: EnvironmentalConditions) -> Self {
        if self.conditions.as_ref() == Some(&conditions) {
            return self.clone();
        }
        Self {
            conditions: Some(conditions),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::EquipmentType;
    use crate::sensor::SensorType;
    use crate::value::{Calibration, Temperature};
    use chrono::{Duration, Utc};

    fn server_room() -> Room {
        Room::new("B-01", "Server Room", RoomType::ServerRoom, 40.0, 2).unwrap()
    }

    fn sensor(sensor_type: SensorType) -> Sensor {
        let calibration = Calibration::new(1.0, 99.0, Duration::days(180), Utc::now()).unwrap();
        Sensor::new(
            "S",
            "M-1",
            "Acme",
            sensor_type,
            calibration,
            std::time::Duration::from_secs(30),
        )
        .unwrap()
    }

    #[test]
    fn test_room_validation() {
        assert!(Room::new("101", "Office", RoomType::Office, 0.0, 4).is_err());
        assert!(Room::new("", "Office", RoomType::Office, 12.0, 4).is_err());
    }

    #[test]
    fn test_compatible_equipment_is_added() {
        let room = server_room();
        let server = Equipment::new("srv-1", "R740", "Dell", EquipmentType::Server, 750.0).unwrap();
        let updated = room.add_equipment(server.clone()).unwrap();

        assert_eq!(updated.equipment().count(), 1);
        assert_eq!(updated.find_equipment(server.id()), Some(&server));
        assert_eq!(room.equipment().count(), 0);
    }

    #[test]
    fn test_incompatible_equipment_is_rejected() {
        let room = server_room();
        let fridge =
            Equipment::new("fridge", "F1", "Cool", EquipmentType::Refrigerator, 200.0).unwrap();

        assert_eq!(
            room.add_equipment(fridge).unwrap_err(),
            DomainError::IncompatibleType {
                room_type: "ServerRoom".to_string(),
                device: "Refrigerator".to_string()
            }
        );
    }

    #[test]
    fn test_incompatible_sensor_is_rejected() {
        let room = server_room();
        assert!(room.add_sensor(sensor(SensorType::Humidity)).is_ok());
        assert!(matches!(
            room.add_sensor(sensor(SensorType::Occupancy)),
            Err(DomainError::IncompatibleType { .. })
        ));
    }

    #[test]
    fn test_same_sensor_twice_rejected() {
        let s = sensor(SensorType::Temperature);
        let room = server_room().add_sensor(s.clone()).unwrap();
        assert!(matches!(
            room.add_sensor(s),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_set_occupied_copies() {
        let room = server_room();
        let occupied = room.set_occupied(true);
        assert!(occupied.is_occupied());
        assert!(!room.is_occupied());
        assert_eq!(occupied.id(), room.id());
    }

    #[test]
    fn test_update_conditions_no_op_when_unchanged() {
        let conditions = EnvironmentalConditions::new(
            Temperature::celsius(21.5).unwrap(),
            40.0,
            550.0,
            400.0,
            Utc::now(),
        )
        .unwrap();
        let room = server_room().update_environmental_conditions(conditions.clone());
        let again = room.update_environmental_conditions(conditions.clone());

        assert_eq!(again, room);
        assert_eq!(room.conditions(), Some(&conditions));
    }
}
