use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use domain::value::{Address, Calibration};
use domain::{
    Building, Equipment, EquipmentType, Floor, FloorType, Room, RoomType, Sensor, SensorType,
};

fn sensor(name: &str, sensor_type: SensorType) -> Result<Sensor> {
    let calibration = Calibration::new(
        1.0,
        97.5,
        Duration::days(365),
        Utc::now() - Duration::days(40),
    )?;
    Ok(Sensor::new(
        name,
        "EnviroSense 3",
        "Sensico",
        sensor_type,
        calibration,
        std::time::Duration::from_secs(300),
    )?)
}

/// Two-storey office analysed when no building is supplied
pub fn sample_building(name: &str) -> Result<Building> {
    let lobby = Room::new("0.01", "Lobby", RoomType::Lobby, 120.0, 40)?;
    let plant = Room::new("0.02", "Plant room", RoomType::Mechanical, 60.0, 2)?;
    let office = Room::new("1.01", "Open office", RoomType::Office, 450.0, 45)?.set_occupied(true);
    let servers = Room::new("1.02", "Server room", RoomType::ServerRoom, 35.0, 0)?;

    let ground = Floor::new(1, "Ground floor", FloorType::Ground, 4.0)?
        .add_room(lobby)?
        .add_room(plant.clone())?;
    let first = Floor::new(2, "First floor", FloorType::Standard, 3.2)?
        .add_room(office.clone())?
        .add_room(servers.clone())?;

    let chiller = Equipment::new(
        "Chiller 1",
        "AquaChill 400",
        "Coolco",
        EquipmentType::Chiller,
        48_000.0,
    )?;
    let ahu = Equipment::new("AHU 1", "AirMax 12", "Ventico", EquipmentType::AirHandler, 7_500.0)?
        .schedule_maintenance(Utc::now() + Duration::days(14), "Filter replacement")?;
    let switch = Equipment::new(
        "Core switch",
        "SW-48",
        "Netco",
        EquipmentType::NetworkSwitch,
        350.0,
    )?;

    let building = Building::new(
        name,
        Address::new("Stationsplein 1", "Utrecht")?.with_country("NL"),
        NaiveDate::from_ymd_opt(2009, 3, 1).unwrap_or_default(),
    )?
    .add_floor(ground)?
    .add_floor(first)?
    .add_equipment(plant.id(), chiller)?
    .add_equipment(plant.id(), ahu)?
    .add_equipment(servers.id(), switch)?
    .add_sensor(office.id(), sensor("Office air quality", SensorType::Co2)?)?
    .add_sensor(servers.id(), sensor("Rack inlet", SensorType::Temperature)?)?;

    Ok(building)
}
