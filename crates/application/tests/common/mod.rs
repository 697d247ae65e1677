#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use domain::telemetry::{
    CollectionError, EnergyReading, EnvironmentalReading, OperationalReading, ReadingSource,
    TimeRange,
};
use domain::value::{Address, Calibration, EnvironmentalConditions, EquipmentMetrics, Temperature};
use domain::{
    Building, Equipment, EquipmentType, Floor, FloorType, Room, RoomType, Sensor, SensorType,
};

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
}

pub fn day() -> TimeRange {
    TimeRange::new(start(), start() + Duration::hours(24)).unwrap()
}

pub fn hourly_energy(values: &[f64]) -> Vec<EnergyReading> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| EnergyReading::new(start() + Duration::hours(i as i64), *v))
        .collect()
}

pub fn climate(hour: i64, celsius: f64, humidity: f64, co2: f64) -> EnvironmentalReading {
    let at = start() + Duration::hours(hour);
    EnvironmentalReading {
        timestamp: at,
        conditions: EnvironmentalConditions::new(
            Temperature::celsius(celsius).unwrap(),
            humidity,
            co2,
            350.0,
            at,
        )
        .unwrap(),
    }
}

pub fn operations(efficiency: &[f64]) -> Vec<OperationalReading> {
    efficiency
        .iter()
        .enumerate()
        .map(|(i, e)| OperationalReading {
            timestamp: start() + Duration::hours(i as i64),
            metrics: EquipmentMetrics::new(*e, (i + 1) as f64, 12.5).unwrap(),
        })
        .collect()
}

pub fn sensor(sensor_type: SensorType) -> Sensor {
    let calibration =
        Calibration::new(1.0, 98.0, Duration::days(180), Utc::now() - Duration::days(10)).unwrap();
    Sensor::new(
        "Probe",
        "TX-1",
        "Sensico",
        sensor_type,
        calibration,
        std::time::Duration::from_secs(60),
    )
    .unwrap()
}

/// One floor, an office (30 seats) and a conference room (10 seats),
/// an air conditioner and a temperature sensor in the office
pub fn office_building() -> (Building, Room, Equipment) {
    let office = Room::new("2.01", "Open office", RoomType::Office, 300.0, 30).unwrap();
    let conference = Room::new("2.02", "Board room", RoomType::Conference, 100.0, 10).unwrap();
    let floor = Floor::new(2, "Second floor", FloorType::Standard, 3.1)
        .unwrap()
        .add_room(office.clone())
        .unwrap()
        .add_room(conference)
        .unwrap();
    let hvac = Equipment::new("Split AC", "SX-9", "Coolair", EquipmentType::Hvac, 3_500.0).unwrap();

    let building = Building::new(
        "Canal House",
        Address::new("Keizersgracht 12", "Amsterdam").unwrap(),
        NaiveDate::from_ymd_opt(1998, 9, 1).unwrap(),
    )
    .unwrap()
    .add_floor(floor)
    .unwrap()
    .add_equipment(office.id(), hvac.clone())
    .unwrap()
    .add_sensor(office.id(), sensor(SensorType::Temperature))
    .unwrap();

    (building, office, hvac)
}

/// Source whose every call fails
pub struct FailingSource(pub CollectionError);

#[async_trait]
impl ReadingSource for FailingSource {
    async fn energy_readings(
        &self,
        _entity_id: &str,
        _range: TimeRange,
        _interval: Duration,
    ) -> Result<Vec<EnergyReading>, CollectionError> {
        Err(self.0.clone())
    }

    async fn environmental_readings(
        &self,
        _entity_id: &str,
        _range: TimeRange,
        _interval: Duration,
    ) -> Result<Vec<EnvironmentalReading>, CollectionError> {
        Err(self.0.clone())
    }

    async fn operational_readings(
        &self,
        _entity_id: &str,
        _range: TimeRange,
        _interval: Duration,
    ) -> Result<Vec<OperationalReading>, CollectionError> {
        Err(self.0.clone())
    }
}

/// Source that never answers
pub struct StalledSource;

#[async_trait]
impl ReadingSource for StalledSource {
    async fn energy_readings(
        &self,
        _entity_id: &str,
        _range: TimeRange,
        _interval: Duration,
    ) -> Result<Vec<EnergyReading>, CollectionError> {
        std::future::pending().await
    }

    async fn environmental_readings(
        &self,
        _entity_id: &str,
        _range: TimeRange,
        _interval: Duration,
    ) -> Result<Vec<EnvironmentalReading>, CollectionError> {
        std::future::pending().await
    }

    async fn operational_readings(
        &self,
        _entity_id: &str,
        _range: TimeRange,
        _interval: Duration,
    ) -> Result<Vec<OperationalReading>, CollectionError> {
        std::future::pending().await
    }
}
