use chrono::{DateTime, Timelike, Utc};
use domain::telemetry::{EnergyReading, OperationalReading};
use domain::{Equipment, EquipmentId, EquipmentStatus};
use infrastructure::config::EfficiencyConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::anomaly::ConsumptionAnomaly;
use super::statistics::mean;
use super::trend::calculate_consumption_trend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EfficiencyMeasure {
    PeakLoadShifting,
    EquipmentInvestigation,
    EquipmentUpgrade,
}

impl EfficiencyMeasure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PeakLoadShifting => "PeakLoadShifting",
            Self::EquipmentInvestigation => "EquipmentInvestigation",
            Self::EquipmentUpgrade => "EquipmentUpgrade",
        }
    }
}

/// Energy saving measure with rule-of-thumb economics
///
/// Savings, cost and payback are fixed per measure, not derived from the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRecommendation {
    pub measure: EfficiencyMeasure,
    pub title: String,
    pub description: String,
    pub estimated_savings_percent: f64,
    pub implementation_cost: f64,
    pub payback_months: u32,
}

impl EfficiencyRecommendation {
    fn peak_load_shifting(hour: u32) -> Self {
        Self {
            measure: EfficiencyMeasure::PeakLoadShifting,
            title: "Shift peak loads".to_string(),
            description: format!(
                "Consumption around {hour:02}:00 is well above the daily average; move flexible loads to off-peak hours"
            ),
            estimated_savings_percent: 15.0,
            implementation_cost: 5_000.0,
            payback_months: 8,
        }
    }

    fn equipment_investigation(anomaly_count: usize) -> Self {
        Self {
            measure: EfficiencyMeasure::EquipmentInvestigation,
            title: "Investigate equipment behaviour".to_string(),
            description: format!(
                "{anomaly_count} consumption anomalies detected; inspect equipment for faults or misconfigured schedules"
            ),
            estimated_savings_percent: 10.0,
            implementation_cost: 2_000.0,
            payback_months: 6,
        }
    }

    fn equipment_upgrade(average_kwh: f64) -> Self {
        Self {
            measure: EfficiencyMeasure::EquipmentUpgrade,
            title: "Upgrade to efficient equipment".to_string(),
            description: format!(
                "Average consumption of {average_kwh:.1} kWh per interval suggests ageing, inefficient plant"
            ),
            estimated_savings_percent: 25.0,
            implementation_cost: 50_000.0,
            payback_months: 36,
        }
    }
}

/// Hour of day whose average consumption exceeds `factor` times the mean of all hourly averages
fn peak_hour(readings: &[EnergyReading], factor: f64) -> Option<u32> {
    let mut buckets: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for reading in readings {
        let bucket = buckets.entry(reading.timestamp.hour()).or_insert((0.0, 0));
        bucket.0 += reading.kwh;
        bucket.1 += 1;
    }

    let averages: Vec<(u32, f64)> = buckets
        .into_iter()
        .map(|(hour, (sum, count))| (hour, sum / count as f64))
        .collect();
    let values: Vec<f64> = averages.iter().map(|(_, avg)| *avg).collect();
    let overall = mean(&values)?;

    averages
        .into_iter()
        .filter(|(_, avg)| *avg > factor * overall)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(hour, _)| hour)
}

/// Apply the independent efficiency rules; any combination may fire
pub fn generate_efficiency_recommendations(
    readings: &[EnergyReading],
    anomalies: &[ConsumptionAnomaly],
    settings: &EfficiencyConfig,
) -> Vec<EfficiencyRecommendation> {
    let mut recommendations = Vec::new();
    if readings.is_empty() {
        return recommendations;
    }

    if let Some(hour) = peak_hour(readings, settings.peak_load_factor) {
        recommendations.push(EfficiencyRecommendation::peak_load_shifting(hour));
    }

    if anomalies.len() > settings.anomaly_investigation_count {
        recommendations.push(EfficiencyRecommendation::equipment_investigation(
            anomalies.len(),
        ));
    }

    let values: Vec<f64> = readings.iter().map(|r| r.kwh).collect();
    if let Some(average) = mean(&values).filter(|avg| *avg > settings.upgrade_threshold_kwh) {
        recommendations.push(EfficiencyRecommendation::equipment_upgrade(average));
    }

    recommendations
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceReason {
    Repair,
    ScheduledService,
    EfficiencyDegradation,
    DecliningPerformance,
    OutOfRangeOperation,
    WarrantyExpired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecommendation {
    pub equipment_id: EquipmentId,
    pub reason: MaintenanceReason,
    pub priority: MaintenancePriority,
    pub description: String,
}

/// Average efficiency below which equipment is flagged as degraded
pub const LOW_EFFICIENCY_PERCENT: f64 = 75.0;
/// Efficiency trend below which performance is considered declining
pub const DECLINING_TREND_PERCENT: f64 = -5.0;

/// Derive maintenance actions from an equipment snapshot and its recent metrics
///
/// Results are ordered by priority, most urgent first.
pub fn generate_maintenance_recommendations(
    equipment: &Equipment,
    metrics: &[OperationalReading],
    now: DateTime<Utc>,
) -> Vec<MaintenanceRecommendation> {
    let recommend = |reason, priority, description: String| MaintenanceRecommendation {
        equipment_id: equipment.id(),
        reason,
        priority,
        description,
    };
    let mut recommendations = Vec::new();

    if equipment.status() == EquipmentStatus::Failed {
        recommendations.push(recommend(
            MaintenanceReason::Repair,
            MaintenancePriority::Critical,
            format!("{} has failed and needs repair", equipment.name()),
        ));
        if equipment.warranty().is_some() && !equipment.is_under_warranty_at(now) {
            recommendations.push(recommend(
                MaintenanceReason::WarrantyExpired,
                MaintenancePriority::Medium,
                format!(
                    "Warranty of {} has expired; repair costs are not covered",
                    equipment.name()
                ),
            ));
        }
    } else if equipment.requires_maintenance_at(now) {
        let description = equipment
            .maintenance_schedule()
            .map(|s| format!("Scheduled maintenance is due: {}", s.description()))
            .unwrap_or_else(|| "Scheduled maintenance is due".to_string());
        recommendations.push(recommend(
            MaintenanceReason::ScheduledService,
            MaintenancePriority::High,
            description,
        ));
    }

    let efficiency: Vec<f64> = metrics.iter().map(|r| r.metrics.efficiency()).collect();
    if let Some(average) = mean(&efficiency).filter(|avg| *avg < LOW_EFFICIENCY_PERCENT) {
        recommendations.push(recommend(
            MaintenanceReason::EfficiencyDegradation,
            MaintenancePriority::Medium,
            format!("Average efficiency of {average:.1}% is below {LOW_EFFICIENCY_PERCENT}%"),
        ));
    }

    if let Some(trend) =
        calculate_consumption_trend(&efficiency).filter(|t| *t < DECLINING_TREND_PERCENT)
    {
        recommendations.push(recommend(
            MaintenanceReason::DecliningPerformance,
            MaintenancePriority::Medium,
            format!("Efficiency dropped {:.1}% over the period", trend.abs()),
        ));
    }

    if let Some(range) = equipment.operating_range() {
        let out_of_range = metrics
            .iter()
            .filter_map(|r| r.metrics.operating_temperature())
            .filter(|t| !range.contains(t.as_celsius()))
            .count();
        if out_of_range > 0 {
            recommendations.push(recommend(
                MaintenanceReason::OutOfRangeOperation,
                MaintenancePriority::High,
                format!(
                    "{out_of_range} readings outside the operating range {:.1}..{:.1} °C",
                    range.min(),
                    range.max()
                ),
            ));
        }
    }

    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations
}
