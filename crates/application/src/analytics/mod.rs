//! Stateless analytics over ordered time series.

pub mod anomaly;
pub mod comfort;
pub mod insights;
pub mod kpi;
pub mod recommendations;
pub mod result;
pub mod statistics;
pub mod trend;
pub mod windows;

pub use anomaly::{AnomalyDirection, ConsumptionAnomaly, detect_consumption_anomalies};
pub use insights::{Insight, InsightCategory, InsightGenerator, InsightReport, prioritize};
pub use kpi::{KpiContext, KpiRegistry, KpiReport, KpiStrategy, KpiValue};
pub use recommendations::{
    EfficiencyMeasure, EfficiencyRecommendation, MaintenancePriority, MaintenanceReason,
    MaintenanceRecommendation, generate_efficiency_recommendations,
    generate_maintenance_recommendations,
};
pub use result::AnalysisResult;
pub use trend::calculate_consumption_trend;
pub use windows::{MAX_WINDOWS, TimeWindows, validate_interval};
