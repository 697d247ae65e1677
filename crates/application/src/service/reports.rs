use chrono::{DateTime, Utc};
use domain::telemetry::TimeRange;
use domain::{EquipmentId, EquipmentStatus};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    ConsumptionAnomaly, EfficiencyRecommendation, MaintenanceRecommendation,
};

/// Consumption summed over one aggregation window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBucket {
    pub window: TimeRange,
    pub kwh: f64,
    pub reading_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyAnalysis {
    pub reading_count: usize,
    pub total_kwh: f64,
    pub average_kwh: f64,
    pub peak_kwh: f64,
    pub peak_at: Option<DateTime<Utc>>,
    /// `None` when the series averages zero
    pub trend_percent: Option<f64>,
    pub buckets: Vec<EnergyBucket>,
    pub anomalies: Vec<ConsumptionAnomaly>,
    pub recommendations: Vec<EfficiencyRecommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalAnalysis {
    pub reading_count: usize,
    pub average_temperature_c: f64,
    pub average_humidity: f64,
    pub average_co2_ppm: f64,
    pub average_light_lux: f64,
    /// Percentage of readings inside the comfort band
    pub comfort_score: f64,
    pub temperature_trend_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentAnalysis {
    pub equipment_id: Option<EquipmentId>,
    pub status: Option<EquipmentStatus>,
    pub reading_count: usize,
    pub average_efficiency: f64,
    pub total_energy_kwh: f64,
    pub uptime_hours: f64,
    /// 0-100 blend of efficiency, status and open issues
    pub health_score: f64,
    pub recommendations: Vec<MaintenanceRecommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub reading_count: usize,
    pub mean_kwh: f64,
    pub std_dev_kwh: f64,
    pub threshold: f64,
    pub anomalies: Vec<ConsumptionAnomaly>,
}
