//! Pluggable building KPIs.
//!
//! Each KPI is a [`KpiStrategy`] registered by name. Every computed KPI carries
//! a 0-100 score; the overall score is the unweighted mean of those scores.

use chrono::{DateTime, Duration, Utc};
use domain::telemetry::{EnergyReading, EnvironmentalReading, TimeRange};
use domain::{Building, EquipmentStatus};
use infrastructure::config::ComfortConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::comfort::comfort_score;
use super::statistics::mean;

/// Everything a KPI may look at
pub struct KpiContext<'a> {
    pub building: &'a Building,
    pub energy: &'a [EnergyReading],
    pub environment: &'a [EnvironmentalReading],
    pub window: TimeRange,
    pub interval: Duration,
    pub comfort: &'a ComfortConfig,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiValue {
    pub name: String,
    pub value: f64,
    pub unit: String,
    /// Normalised 0-100, higher is better
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    pub values: Vec<KpiValue>,
    pub overall_score: f64,
    /// Requested names no strategy is registered for
    pub unknown_kpis: Vec<String>,
    /// Known KPIs that had nothing to compute from
    pub unavailable_kpis: Vec<String>,
}

pub trait KpiStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn unit(&self) -> &'static str;

    /// `None` when the context lacks the data this KPI needs
    fn calculate(&self, context: &KpiContext<'_>) -> Option<KpiValue>;

    fn value(&self, value: f64, score: f64) -> KpiValue {
        KpiValue {
            name: self.name().to_string(),
            value,
            unit: self.unit().to_string(),
            score: score.clamp(0.0, 100.0),
        }
    }
}

/// Annualised consumption per square metre of floor area
pub struct EnergyIntensity;

impl EnergyIntensity {
    /// Intensity scoring 100
    const EXCELLENT: f64 = 50.0;
    /// Intensity scoring 0
    const POOR: f64 = 300.0;
}

impl KpiStrategy for EnergyIntensity {
    fn name(&self) -> &'static str {
        "energy_intensity"
    }

    fn unit(&self) -> &'static str {
        "kWh/m²/yr"
    }

    fn calculate(&self, context: &KpiContext<'_>) -> Option<KpiValue> {
        let area = context.building.total_area();
        let days = context.window.duration().num_seconds() as f64 / 86_400.0;
        if context.energy.is_empty() || area <= 0.0 || days <= 0.0 {
            return None;
        }

        let total: f64 = context.energy.iter().map(|r| r.kwh).sum();
        let annual = total / area * 365.0 / days;
        let score = (Self::POOR - annual) / (Self::POOR - Self::EXCELLENT) * 100.0;
        Some(self.value(annual, score))
    }
}

/// Highest average power over one interval; scored by load factor
pub struct PeakDemand;

impl KpiStrategy for PeakDemand {
    fn name(&self) -> &'static str {
        "peak_demand"
    }

    fn unit(&self) -> &'static str {
        "kW"
    }

    fn calculate(&self, context: &KpiContext<'_>) -> Option<KpiValue> {
        let hours = context.interval.num_seconds() as f64 / 3600.0;
        let peak = context.energy.iter().map(|r| r.kwh).fold(f64::NAN, f64::max);
        if hours <= 0.0 || !peak.is_finite() || peak <= 0.0 {
            return None;
        }

        let values: Vec<f64> = context.energy.iter().map(|r| r.kwh).collect();
        let load_factor = mean(&values)? / peak * 100.0;
        Some(self.value(peak / hours, load_factor))
    }
}

/// Share of seating capacity in currently occupied rooms
pub struct OccupancyUtilization;

impl KpiStrategy for OccupancyUtilization {
    fn name(&self) -> &'static str {
        "occupancy_utilization"
    }

    fn unit(&self) -> &'static str {
        "%"
    }

    fn calculate(&self, context: &KpiContext<'_>) -> Option<KpiValue> {
        let capacity = context.building.total_occupancy();
        if capacity == 0 {
            return None;
        }
        let occupied: u32 = context
            .building
            .all_rooms()
            .into_iter()
            .filter(|room| room.is_occupied())
            .map(|room| room.max_occupancy())
            .sum();
        let utilization = occupied as f64 / capacity as f64 * 100.0;
        Some(self.value(utilization, utilization))
    }
}

pub struct EquipmentAvailability;

impl KpiStrategy for EquipmentAvailability {
    fn name(&self) -> &'static str {
        "equipment_availability"
    }

    fn unit(&self) -> &'static str {
        "%"
    }

    fn calculate(&self, context: &KpiContext<'_>) -> Option<KpiValue> {
        let equipment = context.building.all_equipment();
        if equipment.is_empty() {
            return None;
        }
        let available = equipment
            .iter()
            .filter(|e| e.status() == EquipmentStatus::Operational)
            .count();
        let availability = available as f64 / equipment.len() as f64 * 100.0;
        Some(self.value(availability, availability))
    }
}

/// Mean effective accuracy across all sensors
pub struct SensorHealthKpi;

impl KpiStrategy for SensorHealthKpi {
    fn name(&self) -> &'static str {
        "sensor_health"
    }

    fn unit(&self) -> &'static str {
        "%"
    }

    fn calculate(&self, context: &KpiContext<'_>) -> Option<KpiValue> {
        let accuracies: Vec<f64> = context
            .building
            .all_sensors()
            .into_iter()
            .map(|s| s.current_accuracy_at(context.now))
            .collect();
        let health = mean(&accuracies)?;
        Some(self.value(health, health))
    }
}

/// Share of environmental readings inside the comfort band
pub struct ThermalComfort;

impl KpiStrategy for ThermalComfort {
    fn name(&self) -> &'static str {
        "thermal_comfort"
    }

    fn unit(&self) -> &'static str {
        "%"
    }

    fn calculate(&self, context: &KpiContext<'_>) -> Option<KpiValue> {
        let comfort = comfort_score(context.environment, context.comfort)?;
        Some(self.value(comfort, comfort))
    }
}

/// KPI strategies keyed by name
pub struct KpiRegistry {
    strategies: BTreeMap<&'static str, Box<dyn KpiStrategy>>,
}

impl KpiRegistry {
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Registry holding the six built-in KPIs
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(EnergyIntensity));
        registry.register(Box::new(PeakDemand));
        registry.register(Box::new(OccupancyUtilization));
        registry.register(Box::new(EquipmentAvailability));
        registry.register(Box::new(SensorHealthKpi));
        registry.register(Box::new(ThermalComfort));
        registry
    }

    /// Add a strategy, replacing any registered under the same name
    pub fn register(&mut self, strategy: Box<dyn KpiStrategy>) {
        self.strategies.insert(strategy.name(), strategy);
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Compute the requested KPIs in request order; repeated names count once
    pub fn calculate(&self, names: &[&str], context: &KpiContext<'_>) -> KpiReport {
        let mut report = KpiReport::default();
        let mut seen = Vec::with_capacity(names.len());

        for name in names {
            if seen.contains(name) {
                continue;
            }
            seen.push(*name);

            match self.strategies.get(name) {
                Some(strategy) => match strategy.calculate(context) {
                    Some(value) => report.values.push(value),
                    None => report.unavailable_kpis.push(name.to_string()),
                },
                None => report.unknown_kpis.push(name.to_string()),
            }
        }

        let scores: Vec<f64> = report.values.iter().map(|v| v.score).collect();
        report.overall_score = mean(&scores).unwrap_or(0.0);
        report
    }
}

impl Default for KpiRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use domain::value::Address;
    use domain::{Equipment, EquipmentType, Floor, FloorType, Room, RoomType};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
    }

    fn building() -> Building {
        let office = Room::new("1.01", "Open office", RoomType::Office, 100.0, 10)
            .unwrap()
            .set_occupied(true);
        let meeting = Room::new("1.02", "Meeting", RoomType::Conference, 100.0, 30).unwrap();
        let floor = Floor::new(1, "First", FloorType::Standard, 3.0)
            .unwrap()
            .add_room(office.clone())
            .unwrap()
            .add_room(meeting)
            .unwrap();
        let ac = Equipment::new("AC", "A1", "Acme", EquipmentType::Hvac, 2_000.0).unwrap();
        let light = Equipment::new("Light", "L1", "Acme", EquipmentType::Lighting, 200.0)
            .unwrap()
            .set_status(EquipmentStatus::Offline)
            .unwrap();

        Building::new(
            "Test",
            Address::new("Main 1", "Springfield").unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        )
        .unwrap()
        .add_floor(floor)
        .unwrap()
        .add_equipment(office.id(), ac)
        .unwrap()
        .add_equipment(office.id(), light)
        .unwrap()
    }

    fn hourly(values: &[f64]) -> Vec<EnergyReading> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| EnergyReading::new(start() + Duration::hours(i as i64), *v))
            .collect()
    }

    fn context<'a>(
        building: &'a Building,
        energy: &'a [EnergyReading],
        comfort: &'a ComfortConfig,
    ) -> KpiContext<'a> {
        KpiContext {
            building,
            energy,
            environment: &[],
            window: TimeRange::new(start(), start() + Duration::days(1)).unwrap(),
            interval: Duration::hours(1),
            comfort,
            now: start(),
        }
    }

    #[test]
    fn test_structural_kpis() {
        let building = building();
        let comfort = ComfortConfig::default();
        let report = KpiRegistry::with_defaults().calculate(
            &["occupancy_utilization", "equipment_availability"],
            &context(&building, &[], &comfort),
        );

        assert_eq!(report.values.len(), 2);
        assert_eq!(report.values[0].value, 25.0);
        assert_eq!(report.values[1].value, 50.0);
        assert_eq!(report.overall_score, 37.5);
    }

    #[test]
    fn test_peak_demand_scored_by_load_factor() {
        let building = building();
        let comfort = ComfortConfig::default();
        let energy = hourly(&[10.0, 10.0, 10.0, 50.0]);
        let report = KpiRegistry::with_defaults()
            .calculate(&["peak_demand"], &context(&building, &energy, &comfort));

        let peak = &report.values[0];
        assert_eq!(peak.value, 50.0);
        assert_eq!(peak.unit, "kW");
        assert_eq!(peak.score, 40.0);
    }

    #[test]
    fn test_energy_intensity_is_annualised() {
        let building = building();
        let comfort = ComfortConfig::default();
        // 200 m², 20 kWh in one day -> 0.1 kWh/m²/day -> 36.5 kWh/m²/yr
        let energy = hourly(&[10.0, 10.0]);
        let report = KpiRegistry::with_defaults()
            .calculate(&["energy_intensity"], &context(&building, &energy, &comfort));

        assert!((report.values[0].value - 36.5).abs() < 1e-9);
        assert_eq!(report.values[0].score, 100.0);
    }

    #[test]
    fn test_unknown_and_unavailable_kpis() {
        let building = building();
        let comfort = ComfortConfig::default();
        let report = KpiRegistry::with_defaults().calculate(
            &[
                "thermal_comfort",
                "carbon_footprint",
                "equipment_availability",
                "equipment_availability",
            ],
            &context(&building, &[], &comfort),
        );

        assert_eq!(report.unknown_kpis, vec!["carbon_footprint"]);
        assert_eq!(report.unavailable_kpis, vec!["thermal_comfort"]);
        assert_eq!(report.values.len(), 1);
        assert_eq!(report.overall_score, 50.0);
    }

    #[test]
    fn test_nothing_computed_scores_zero() {
        let building = building();
        let comfort = ComfortConfig::default();
        let report = KpiRegistry::with_defaults()
            .calculate(&["nope"], &context(&building, &[], &comfort));
        assert_eq!(report.overall_score, 0.0);
    }

    #[test]
    fn test_custom_strategy() {
        struct FloorCount;
        impl KpiStrategy for FloorCount {
            fn name(&self) -> &'static str {
                "floor_count"
            }
            fn unit(&self) -> &'static str {
                "floors"
            }
            fn calculate(&self, context: &KpiContext<'_>) -> Option<KpiValue> {
                Some(self.value(context.building.floor_count() as f64, 100.0))
            }
        }

        let mut registry = KpiRegistry::with_defaults();
        registry.register(Box::new(FloorCount));
        assert!(registry.contains("floor_count"));
        assert_eq!(registry.names().count(), 7);

        let building = building();
        let comfort = ComfortConfig::default();
        let report = registry.calculate(&["floor_count"], &context(&building, &[], &comfort));
        assert_eq!(report.values[0].value, 1.0);
    }
}
