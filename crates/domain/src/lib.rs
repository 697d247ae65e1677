//! Domain layer - Building structure and telemetry contracts
//!
//! This crate contains:
//! - Entities (Building, Floor, Room, Equipment, Sensor)
//! - Value Objects (Calibration, SensorHealth, EnvironmentalConditions, ...)
//! - Domain Events
//! - Boundary interfaces (traits) for readings, persistence and publishing
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Every mutation returns a new value, receivers are never changed
//! - Invariants enforced at construction and on every operation
//! - Testable in isolation

pub mod building;
pub mod equipment;
pub mod error;
pub mod event;
pub mod ids;
pub mod sensor;
pub mod telemetry;
pub mod value;

// Re-export commonly used types
pub use building::{Building, BuildingStatus, Floor, FloorType, Room, RoomType};
pub use equipment::{Equipment, EquipmentStatus, EquipmentType};
pub use error::DomainError;
pub use event::{AlertSeverity, DomainEvent, EventKind};
pub use ids::{BuildingId, EquipmentId, FloorId, RoomId, SensorId};
pub use sensor::{Sensor, SensorReading, SensorStatus, SensorType};
