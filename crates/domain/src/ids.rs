use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares an identifier value object backed by a random UUID.
///
/// Identifiers are assigned once at construction and never reused, so two
/// entities built from identical attributes still have different ids.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Rebuild an identifier read back from storage
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a Building aggregate
    BuildingId
);
entity_id!(
    /// Identifier of a Floor within a building
    FloorId
);
entity_id!(
    /// Identifier of a Room within a floor
    RoomId
);
entity_id!(
    /// Identifier of a piece of equipment
    EquipmentId
);
entity_id!(
    /// Identifier of a sensor
    SensorId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = FloorId::new();
        let b = FloorId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_round_trips_through_uuid() {
        let id = SensorId::new();
        assert_eq!(SensorId::from_uuid(*id.as_uuid()), id);
    }

    #[test]
    fn test_id_serializes_as_plain_uuid() {
        let id = RoomId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
