use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{BuildingStatus, Floor, Room};
use crate::equipment::{Equipment, EquipmentStatus};
use crate::error::{DomainError, Result};
use crate::event::{AlertSeverity, DomainEvent, EventKind};
use crate::ids::{BuildingId, EquipmentId, FloorId, RoomId};
use crate::sensor::Sensor;
use crate::value::{Address, EnvironmentalConditions, check_non_negative, check_not_blank};

/// Building aggregate root
///
/// Every operation returns a new `Building` and appends exactly one event;
/// the receiver keeps its floors and its event log. Floors, rooms and devices
/// sit behind `Arc`, so a new version only re-allocates the path from the
/// root to the changed node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    id: BuildingId,
    name: String,
    address: Address,
    metadata: Option<serde_json::Value>,
    constructed_on: NaiveDate,
    status: BuildingStatus,
    floors: Vec<Arc<Floor>>,
    events: Vec<Arc<DomainEvent>>,
}

impl Building {
    /// Create a building with no floors yet
    pub fn new(
        name: impl Into<String>,
        address: Address,
        constructed_on: NaiveDate,
    ) -> Result<Self> {
        Ok(Self {
            id: BuildingId::new(),
            name: check_not_blank("building name", name)?,
            address,
            metadata: None,
            constructed_on,
            status: BuildingStatus::default(),
            floors: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    // Getters
    pub fn id(&self) -> BuildingId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    pub fn constructed_on(&self) -> NaiveDate {
        self.constructed_on
    }

    pub fn status(&self) -> BuildingStatus {
        self.status
    }

    pub fn is_in_maintenance(&self) -> bool {
        self.status == BuildingStatus::Maintenance
    }

    /// Number of events recorded so far
    pub fn version(&self) -> u64 {
        self.events.len() as u64
    }

    pub fn events(&self) -> impl Iterator<Item = &DomainEvent> {
        self.events.iter().map(Arc::as_ref)
    }

    /// Events appended after `version`, oldest first
    pub fn events_since(&self, version: u64) -> Vec<DomainEvent> {
        let start = usize::try_from(version).unwrap_or(usize::MAX);
        self.events
            .iter()
            .skip(start)
            .map(|e| e.as_ref().clone())
            .collect()
    }

    pub fn floors(&self) -> impl Iterator<Item = &Floor> {
        self.floors.iter().map(Arc::as_ref)
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floor(&self, id: FloorId) -> Option<&Floor> {
        self.floors().find(|f| f.id() == id)
    }

    pub fn floor_by_number(&self, number: u32) -> Option<&Floor> {
        self.floors().find(|f| f.number() == number)
    }

    pub fn total_area(&self) -> f64 {
        self.floors().map(Floor::total_area).sum()
    }

    pub fn total_occupancy(&self) -> u32 {
        self.floors().map(Floor::total_occupancy).sum()
    }

    /// Every room, floor by floor
    pub fn all_rooms(&self) -> Vec<&Room> {
        self.floors().flat_map(Floor::rooms).collect()
    }

    /// Every piece of equipment, floor by floor then room by room
    pub fn all_equipment(&self) -> Vec<&Equipment> {
        self.floors()
            .flat_map(Floor::rooms)
            .flat_map(Room::equipment)
            .collect()
    }

    /// Every sensor, floor by floor then room by room
    pub fn all_sensors(&self) -> Vec<&Sensor> {
        self.floors()
            .flat_map(Floor::rooms)
            .flat_map(Room::sensors)
            .collect()
    }

    pub fn find_room(&self, id: RoomId) -> Option<&Room> {
        self.floors().find_map(|f| f.room(id))
    }

    pub fn find_equipment(&self, id: EquipmentId) -> Option<&Equipment> {
        self.floors()
            .flat_map(Floor::rooms)
            .find_map(|r| r.find_equipment(id))
    }

    fn record(mut self, kind: EventKind) -> Self {
        self.events.push(Arc::new(DomainEvent::new(self.id, kind)));
        self
    }

    fn ensure_structure_unlocked(&self) -> Result<()> {
        if !self.status.allows_structural_changes() {
            return Err(DomainError::InvalidState(format!(
                "building {} is in {} mode",
                self.name, self.status
            )));
        }
        Ok(())
    }

    pub fn add_floor(&self, floor: Floor) -> Result<Self> {
        self.ensure_structure_unlocked()?;
        if self.floor_by_number(floor.number()).is_some() {
            return Err(DomainError::DuplicateFloorNumber(floor.number()));
        }

        let kind = EventKind::FloorAdded {
            floor_id: floor.id(),
            floor_number: floor.number(),
        };
        let mut updated = self.clone();
        updated.floors.push(Arc::new(floor));
        Ok(updated.record(kind))
    }

    /// Remove a floor; a building never drops back to zero floors
    pub fn remove_floor(&self, id: FloorId) -> Result<Self> {
        self.ensure_structure_unlocked()?;
        let index = self
            .floors
            .iter()
            .position(|f| f.id() == id)
            .ok_or_else(|| DomainError::not_found("Floor", id))?;

        if self.floors.len() == 1 {
            return Err(DomainError::InvariantViolation(format!(
                "cannot remove the last floor of building {}",
                self.name
            )));
        }

        let mut updated = self.clone();
        let removed = updated.floors.remove(index);
        Ok(updated.record(EventKind::FloorRemoved {
            floor_id: removed.id(),
            floor_number: removed.number(),
        }))
    }

    /// Enter or leave maintenance mode; no event when already in that mode
    pub fn set_maintenance_mode(&self, enabled: bool) -> Self {
        if self.is_in_maintenance() == enabled {
            return self.clone();
        }

        let mut updated = self.clone();
        updated.status = if enabled {
            BuildingStatus::Maintenance
        } else {
            BuildingStatus::Operational
        };
        updated.record(EventKind::MaintenanceModeChanged { enabled })
    }

    fn locate_room(&self, id: RoomId) -> Result<(usize, &Room)> {
        self.floors
            .iter()
            .enumerate()
            .find_map(|(index, floor)| floor.room(id).map(|room| (index, room)))
            .ok_or_else(|| DomainError::not_found("Room", id))
    }

    /// Copy the path root -> floor -> room, replacing the room
    fn with_room(&self, floor_index: usize, room: Room) -> Result<Self> {
        let floor = self.floors[floor_index].replace_room(room)?;
        let mut updated = self.clone();
        updated.floors[floor_index] = Arc::new(floor);
        Ok(updated)
    }

    pub fn add_room(&self, floor_id: FloorId, room: Room) -> Result<Self> {
        let index = self
            .floors
            .iter()
            .position(|f| f.id() == floor_id)
            .ok_or_else(|| DomainError::not_found("Floor", floor_id))?;

        let kind = EventKind::RoomAdded {
            floor_id,
            room_id: room.id(),
            room_number: room.number().to_string(),
        };
        let floor = self.floors[index].add_room(room)?;
        let mut updated = self.clone();
        updated.floors[index] = Arc::new(floor);
        Ok(updated.record(kind))
    }

    pub fn add_equipment(&self, room_id: RoomId, equipment: Equipment) -> Result<Self> {
        let (floor_index, room) = self.locate_room(room_id)?;
        let kind = EventKind::EquipmentAdded {
            room_id,
            equipment_id: equipment.id(),
            equipment_type: equipment.equipment_type(),
        };
        let room = room.add_equipment(equipment)?;
        Ok(self.with_room(floor_index, room)?.record(kind))
    }

    pub fn add_sensor(&self, room_id: RoomId, sensor: Sensor) -> Result<Self> {
        let (floor_index, room) = self.locate_room(room_id)?;
        let kind = EventKind::SensorAdded {
            room_id,
            sensor_id: sensor.id(),
            sensor_type: sensor.sensor_type(),
        };
        let room = room.add_sensor(sensor)?;
        Ok(self.with_room(floor_index, room)?.record(kind))
    }

    pub fn set_equipment_status(&self, id: EquipmentId, status: EquipmentStatus) -> Result<Self> {
        let (floor_index, room) = self
            .floors
            .iter()
            .enumerate()
            .find_map(|(index, floor)| {
                floor
                    .rooms()
                    .find(|room| room.find_equipment(id).is_some())
                    .map(|room| (index, room))
            })
            .ok_or_else(|| DomainError::not_found("Equipment", id))?;

        let current = room
            .find_equipment(id)
            .ok_or_else(|| DomainError::not_found("Equipment", id))?;
        let from = current.status();
        let changed = current.set_status(status)?;
        let room = room.replace_equipment(changed)?;

        Ok(self
            .with_room(floor_index, room)?
            .record(EventKind::EquipmentStatusChanged {
                equipment_id: id,
                from,
                to: status,
            }))
    }

    /// Replace a room's climate snapshot; no event when nothing changed
    pub fn update_environmental_conditions(
        &self,
        room_id: RoomId,
        conditions: EnvironmentalConditions,
    ) -> Result<Self> {
        let (floor_index, room) = self.locate_room(room_id)?;
        if room.conditions() == Some(&conditions) {
            return Ok(self.clone());
        }

        let kind = EventKind::EnvironmentalConditionsUpdated {
            room_id,
            temperature_c: conditions.temperature().as_celsius(),
            humidity: conditions.humidity(),
            co2_ppm: conditions.co2_ppm(),
        };
        let room = room.update_environmental_conditions(conditions);
        Ok(self.with_room(floor_index, room)?.record(kind))
    }

    pub fn trigger_alert(
        &self,
        source: impl Into<String>,
        severity: AlertSeverity,
        message: impl Into<String>,
    ) -> Result<Self> {
        Ok(self.clone().record(EventKind::AlertTriggered {
            source: check_not_blank("alert source", source)?,
            severity,
            message: check_not_blank("alert message", message)?,
        }))
    }

    pub fn record_energy_consumption(&self, source: impl Into<String>, kwh: f64) -> Result<Self> {
        Ok(self.clone().record(EventKind::EnergyConsumptionRecorded {
            source: check_not_blank("consumption source", source)?,
            kwh: check_non_negative("energy consumption", kwh)?,
        }))
    }

    #[cfg(test)]
    fn floor_handle(&self, id: FloorId) -> Option<&Arc<Floor>> {
        self.floors.iter().find(|f| f.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::{FloorType, RoomType};
    use crate::equipment::EquipmentType;
    use crate::value::Temperature;
    use chrono::Utc;

    fn create_test_building() -> Building {
        Building::new(
            "HQ",
            Address::new("1 Main St", "Springfield").unwrap(),
            NaiveDate::from_ymd_opt(2010, 6, 1).unwrap(),
        )
        .unwrap()
    }

    fn floor(number: u32, area: f64) -> Floor {
        Floor::new(number, format!("Level {number}"), FloorType::Standard, 3.2)
            .unwrap()
            .add_room(Room::new(format!("{number}01"), "Open plan", RoomType::Office, area, 10).unwrap())
            .unwrap()
    }

    fn one_floor_building() -> Building {
        create_test_building().add_floor(floor(1, 100.0)).unwrap()
    }

    #[test]
    fn test_new_building_is_empty() {
        let building = create_test_building();
        assert_eq!(building.floor_count(), 0);
        assert_eq!(building.version(), 0);
        assert_eq!(building.status(), BuildingStatus::Operational);
        assert!(Building::new(" ", building.address().clone(), building.constructed_on()).is_err());
    }

    #[test]
    fn test_add_and_remove_floor_scenario() {
        let building = one_floor_building();
        let first = building.floor_by_number(1).unwrap().id();

        let two = building.add_floor(floor(2, 200.0)).unwrap();
        assert!((two.total_area() - 300.0).abs() < f64::EPSILON);
        assert_eq!(two.total_occupancy(), 20);

        let only_second = two.remove_floor(first).unwrap();
        assert_eq!(only_second.floor_count(), 1);
        assert_eq!(only_second.floors().next().unwrap().number(), 2);
        assert!((only_second.total_area() - 200.0).abs() < f64::EPSILON);

        let last = only_second.floor_by_number(2).unwrap().id();
        let err = only_second.remove_floor(last).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(ref m) if m.contains("last floor")));

        let types: Vec<_> = only_second.events().map(|e| e.event_type()).collect();
        assert_eq!(types, vec!["FloorAdded", "FloorAdded", "FloorRemoved"]);
    }

    #[test]
    fn test_operations_leave_receiver_unchanged() {
        let building = one_floor_building();
        let snapshot = building.clone();

        let _ = building.add_floor(floor(2, 50.0)).unwrap();
        let _ = building.set_maintenance_mode(true);
        let _ = building
            .trigger_alert("fire-panel", AlertSeverity::Warning, "Test")
            .unwrap();
        let _ = building.record_energy_consumption("main-meter", 12.5).unwrap();

        assert_eq!(building, snapshot);
        assert_eq!(building.version(), 1);
    }

    #[test]
    fn test_duplicate_floor_number() {
        let building = one_floor_building();
        assert_eq!(
            building.add_floor(floor(1, 10.0)).unwrap_err(),
            DomainError::DuplicateFloorNumber(1)
        );
    }

    #[test]
    fn test_remove_unknown_floor() {
        let building = one_floor_building().add_floor(floor(2, 10.0)).unwrap();
        assert!(matches!(
            building.remove_floor(FloorId::new()),
            Err(DomainError::NotFound { kind: "Floor", .. })
        ));
    }

    #[test]
    fn test_maintenance_lock_scenario() {
        let locked = one_floor_building().set_maintenance_mode(true);
        assert_eq!(locked.status(), BuildingStatus::Maintenance);

        let candidate = floor(2, 80.0);
        assert!(matches!(
            locked.add_floor(candidate.clone()),
            Err(DomainError::InvalidState(_))
        ));
        // invalid floor still reports the lock first
        assert!(matches!(
            locked.add_floor(floor(1, 80.0)),
            Err(DomainError::InvalidState(_))
        ));

        let unlocked = locked.set_maintenance_mode(false);
        assert_eq!(unlocked.status(), BuildingStatus::Operational);
        assert!(unlocked.add_floor(candidate).is_ok());
    }

    #[test]
    fn test_maintenance_mode_no_op() {
        let building = one_floor_building();
        let same = building.set_maintenance_mode(false);
        assert_eq!(same.version(), building.version());

        let locked = building.set_maintenance_mode(true);
        let still = locked.set_maintenance_mode(true);
        assert_eq!(still.version(), locked.version());
        assert_eq!(locked.version(), building.version() + 1);
    }

    #[test]
    fn test_nested_mutations_share_untouched_floors() {
        let building = one_floor_building().add_floor(floor(2, 60.0)).unwrap();
        let first = building.floor_by_number(1).unwrap().id();
        let second = building.floor_by_number(2).unwrap();
        let room_id = second.rooms().next().unwrap().id();

        let pc = Equipment::new("PC-7", "T14", "Lenovo", EquipmentType::Computer, 65.0).unwrap();
        let updated = building.add_equipment(room_id, pc).unwrap();

        assert!(Arc::ptr_eq(
            building.floor_handle(first).unwrap(),
            updated.floor_handle(first).unwrap()
        ));
        assert_eq!(updated.all_equipment().len(), 1);
        assert_eq!(building.all_equipment().len(), 0);
        assert_eq!(updated.events().last().unwrap().event_type(), "EquipmentAdded");
    }

    #[test]
    fn test_equipment_status_routed_through_root() {
        let building = one_floor_building();
        let room_id = building.all_rooms()[0].id();
        let hvac = Equipment::new("FCU-1", "FC", "Acme", EquipmentType::Hvac, 900.0).unwrap();
        let hvac_id = hvac.id();
        let building = building.add_equipment(room_id, hvac).unwrap();

        let serviced = building
            .set_equipment_status(hvac_id, EquipmentStatus::Maintenance)
            .unwrap();
        assert_eq!(
            serviced.find_equipment(hvac_id).unwrap().status(),
            EquipmentStatus::Maintenance
        );
        assert!(matches!(
            serviced.events().last().unwrap().kind(),
            EventKind::EquipmentStatusChanged {
                from: EquipmentStatus::Operational,
                to: EquipmentStatus::Maintenance,
                ..
            }
        ));

        let before = serviced.version();
        assert!(matches!(
            serviced.set_equipment_status(hvac_id, EquipmentStatus::Failed),
            Err(DomainError::InvalidTransition { .. })
        ));
        assert_eq!(serviced.version(), before);
    }

    #[test]
    fn test_incompatible_device_through_root() {
        let building = one_floor_building();
        let room_id = building.all_rooms()[0].id();
        let chiller = Equipment::new("CH-1", "C", "Acme", EquipmentType::Chiller, 9000.0).unwrap();
        assert!(matches!(
            building.add_equipment(room_id, chiller),
            Err(DomainError::IncompatibleType { .. })
        ));
    }

    #[test]
    fn test_environment_update_emits_once() {
        let building = one_floor_building();
        let room_id = building.all_rooms()[0].id();
        let conditions = EnvironmentalConditions::new(
            Temperature::celsius(22.0).unwrap(),
            45.0,
            700.0,
            350.0,
            Utc::now(),
        )
        .unwrap();

        let updated = building
            .update_environmental_conditions(room_id, conditions.clone())
            .unwrap();
        let again = updated
            .update_environmental_conditions(room_id, conditions)
            .unwrap();
        assert_eq!(updated.version(), building.version() + 1);
        assert_eq!(again.version(), updated.version());
    }

    #[test]
    fn test_events_since() {
        let building = one_floor_building();
        let v = building.version();
        let next = building
            .record_energy_consumption("main-meter", 42.0)
            .unwrap()
            .trigger_alert("main-meter", AlertSeverity::Info, "Reading spike")
            .unwrap();

        let tail = next.events_since(v);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].event_type(), "EnergyConsumptionRecorded");
        assert_eq!(tail[1].event_type(), "AlertTriggered");
        assert!(next.events_since(100).is_empty());
        assert!(building.record_energy_consumption("m", -1.0).is_err());
    }
}
