use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Room;
use crate::error::{DomainError, Result};
use crate::ids::{FloorId, RoomId};
use crate::value::{check_not_blank, check_positive};

/// Kind of storey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorType {
    Basement,
    Ground,
    Standard,
    Mezzanine,
    Roof,
    Mechanical,
    Parking,
}

/// A storey of a building owning its rooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    id: FloorId,
    number: u32,
    name: String,
    floor_type: FloorType,
    height: f64,
    metadata: Option<serde_json::Value>,
    rooms: Vec<Arc<Room>>,
}

impl Floor {
    /// Create an empty floor; `number` must be positive, `height` in metres
    pub fn new(
        number: u32,
        name: impl Into<String>,
        floor_type: FloorType,
        height: f64,
    ) -> Result<Self> {
        if number == 0 {
            return Err(DomainError::validation("floor number must be positive"));
        }
        Ok(Self {
            id: FloorId::new(),
            number,
            name: check_not_blank("floor name", name)?,
            floor_type,
            height: check_positive("floor height", height)?,
            metadata: None,
            rooms: Vec::new(),
        })
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    // Getters
    pub fn id(&self) -> FloorId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn floor_type(&self) -> FloorType {
        self.floor_type
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().map(Arc::as_ref)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms().find(|r| r.id() == id)
    }

    pub fn room_by_number(&self, number: &str) -> Option<&Room> {
        self.rooms().find(|r| r.number() == number)
    }

    pub fn total_area(&self) -> f64 {
        self.rooms().map(Room::area).sum()
    }

    pub fn total_occupancy(&self) -> u32 {
        self.rooms().map(Room::max_occupancy).sum()
    }

    pub fn add_room(&self, room: Room) -> Result<Self> {
        if self.room_by_number(room.number()).is_some() {
            return Err(DomainError::DuplicateRoomNumber(room.number().to_string()));
        }

        let mut updated = self.clone();
        updated.rooms.push(Arc::new(room));
        Ok(updated)
    }

    /// Remove a room; a floor never drops back to zero rooms
    pub fn remove_room(&self, id: RoomId) -> Result<Self> {
        let index = self
            .rooms
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found("Room", id))?;

        if self.rooms.len() == 1 {
            return Err(DomainError::InvariantViolation(format!(
                "cannot remove the last room of floor {}",
                self.number
            )));
        }

        let mut updated = self.clone();
        updated.rooms.remove(index);
        Ok(updated)
    }

    /// Swap in a new version of one of this floor's rooms
    pub(crate) fn replace_room(&self, room: Room) -> Result<Self> {
        let index = self
            .rooms
            .iter()
            .position(|r| r.id() == room.id())
            .ok_or_else(|| DomainError::not_found("Room", room.id()))?;

        let mut updated = self.clone();
        updated.rooms[index] = Arc::new(room);
        Ok(updated)
    }

    #[cfg(test)]
    pub(crate) fn room_handle(&self, id: RoomId) -> Option<&Arc<Room>> {
        self.rooms.iter().find(|r| r.id() == id)
    }
}
