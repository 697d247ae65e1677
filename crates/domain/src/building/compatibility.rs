//! Which devices a room type accepts.
//!
//! Room types without an entry accept every equipment and sensor type.

use super::RoomType;
use crate::equipment::EquipmentType;
use crate::sensor::SensorType;

/// Equipment types accepted by `room_type`, `None` when unrestricted
pub fn allowed_equipment(room_type: RoomType) -> Option<&'static [EquipmentType]> {
    use EquipmentType::*;
    match room_type {
        RoomType::ServerRoom => Some(&[Server, NetworkSwitch, Ups]),
        RoomType::Office => Some(&[
            Hvac,
            Lighting,
            Computer,
            Printer,
            AccessControl,
            SecurityCamera,
        ]),
        RoomType::Conference => Some(&[Hvac, Lighting, Projector, Computer]),
        RoomType::Kitchen => Some(&[Refrigerator, Hvac, Lighting, FireSuppression]),
        RoomType::Mechanical => Some(&[Hvac, Pump, Chiller, Boiler, AirHandler]),
        RoomType::Electrical => Some(&[Generator, Ups, Transformer, ElectricalPanel]),
        RoomType::Laboratory
        | RoomType::Storage
        | RoomType::Restroom
        | RoomType::Lobby
        | RoomType::Custom => None,
    }
}

/// Sensor types accepted by `room_type`, `None` when unrestricted
pub fn allowed_sensors(room_type: RoomType) -> Option<&'static [SensorType]> {
    use SensorType::*;
    match room_type {
        RoomType::ServerRoom => Some(&[Temperature, Humidity, Power]),
        RoomType::Office => Some(&[Temperature, Humidity, Co2, Occupancy, Light, Motion]),
        RoomType::Conference => Some(&[Temperature, Co2, Occupancy, Light, Sound]),
        RoomType::Kitchen => Some(&[Temperature, Humidity, Smoke, WaterLeak]),
        RoomType::Mechanical => Some(&[Temperature, Pressure, Vibration, WaterLeak]),
        RoomType::Electrical => Some(&[Temperature, Power, Energy, Smoke]),
        RoomType::Laboratory
        | RoomType::Storage
        | RoomType::Restroom
        | RoomType::Lobby
        | RoomType::Custom => None,
    }
}

pub fn equipment_allowed(room_type: RoomType, equipment_type: EquipmentType) -> bool {
    allowed_equipment(room_type).is_none_or(|allowed| allowed.contains(&equipment_type))
}

pub fn sensor_allowed(room_type: RoomType, sensor_type: SensorType) -> bool {
    allowed_sensors(room_type).is_none_or(|allowed| allowed.contains(&sensor_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_room_table() {
        assert!(equipment_allowed(RoomType::ServerRoom, EquipmentType::Server));
        assert!(equipment_allowed(RoomType::ServerRoom, EquipmentType::Ups));
        assert!(!equipment_allowed(RoomType::ServerRoom, EquipmentType::Refrigerator));
        assert!(sensor_allowed(RoomType::ServerRoom, SensorType::Humidity));
        assert!(!sensor_allowed(RoomType::ServerRoom, SensorType::Occupancy));
    }

    #[test]
    fn test_unrestricted_rooms_accept_everything() {
        for room_type in [
            RoomType::Laboratory,
            RoomType::Storage,
            RoomType::Restroom,
            RoomType::Lobby,
            RoomType::Custom,
        ] {
            assert!(EquipmentType::ALL
                .iter()
                .all(|t| equipment_allowed(room_type, *t)));
            assert!(SensorType::ALL.iter().all(|t| sensor_allowed(room_type, *t)));
        }
    }

    #[test]
    fn test_every_room_accepts_a_temperature_sensor() {
        for room_type in RoomType::ALL {
            assert!(sensor_allowed(room_type, SensorType::Temperature));
        }
    }
}
