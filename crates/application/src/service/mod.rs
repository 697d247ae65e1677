//! Analysis use cases over a [`ReadingSource`].
//!
//! Every operation returns an [`AnalysisResult`]; collection failures and
//! cancellation become failed results instead of errors.

mod reports;

pub use reports::{
    AnomalyReport, EnergyAnalysis, EnergyBucket, EnvironmentalAnalysis, EquipmentAnalysis,
};

use chrono::{Duration, Utc};
use domain::telemetry::{
    CollectionError, EnergyReading, EnvironmentalReading, ReadingSource, TimeRange,
};
use domain::value::EnvironmentalConditions;
use domain::{Building, Equipment, EquipmentStatus, RoomId};
use infrastructure::config::AnalyticsConfig;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::analytics::comfort::comfort_score;
use crate::analytics::insights::{InsightContext, default_generators};
use crate::analytics::statistics::{mean, std_dev};
use crate::analytics::{
    AnalysisResult, InsightGenerator, InsightReport, KpiContext, KpiRegistry, KpiReport,
    MaintenancePriority, TimeWindows, calculate_consumption_trend, detect_consumption_anomalies,
    generate_efficiency_recommendations, generate_maintenance_recommendations, prioritize,
    validate_interval,
};
use crate::error::AnalysisError;

type Outcome<T> = Result<Option<T>, AnalysisError>;

pub struct AnalyticsService {
    source: Arc<dyn ReadingSource>,
    config: AnalyticsConfig,
    kpis: KpiRegistry,
    generators: Vec<Box<dyn InsightGenerator>>,
}

impl AnalyticsService {
    pub fn new(source: Arc<dyn ReadingSource>, config: AnalyticsConfig) -> Self {
        Self {
            source,
            config,
            kpis: KpiRegistry::with_defaults(),
            generators: default_generators(),
        }
    }

    pub fn with_kpi_registry(mut self, kpis: KpiRegistry) -> Self {
        self.kpis = kpis;
        self
    }

    /// Run an extra generator after the built-in ones
    pub fn with_insight_generator(mut self, generator: Box<dyn InsightGenerator>) -> Self {
        self.generators.push(generator);
        self
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Await a collection call unless the token fires first
    async fn collect<T>(
        &self,
        cancel: &CancellationToken,
        collection: impl Future<Output = Result<T, CollectionError>>,
    ) -> Result<T, AnalysisError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AnalysisError::Cancelled),
            result = collection => Ok(result?),
        }
    }

    fn finish<T: Default>(
        &self,
        operation: &'static str,
        subject_id: &str,
        range: TimeRange,
        outcome: Outcome<T>,
        no_data_message: &str,
    ) -> AnalysisResult<T> {
        match &outcome {
            Ok(Some(_)) => debug!(operation, subject_id, "✅ Analysis completed"),
            Ok(None) => info!(operation, subject_id, "📭 {}", no_data_message),
            Err(e) => warn!(operation, subject_id, error = %e, "⚠️ Analysis failed"),
        }
        AnalysisResult::from_outcome(subject_id, range, outcome, no_data_message)
    }

    /// Consumption totals, trend, anomalies and efficiency recommendations
    pub async fn analyze_energy(
        &self,
        subject_id: &str,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> AnalysisResult<EnergyAnalysis> {
        info!(subject_id, "📊 Energy analysis started");
        let outcome = self.energy_analysis(subject_id, range, interval, cancel).await;
        self.finish(
            "energy",
            subject_id,
            range,
            outcome,
            "No energy data available for the period",
        )
    }

    async fn energy_analysis(
        &self,
        subject_id: &str,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Outcome<EnergyAnalysis> {
        let windows = TimeWindows::over(range, interval)?;
        let readings = self
            .collect(cancel, self.source.energy_readings(subject_id, range, interval))
            .await?;
        if readings.is_empty() {
            return Ok(None);
        }

        let values: Vec<f64> = readings.iter().map(|r| r.kwh).collect();
        let peak = readings
            .iter()
            .max_by(|a, b| a.kwh.total_cmp(&b.kwh))
            .copied();
        let anomalies = detect_consumption_anomalies(&readings, &self.config.anomaly);
        let recommendations =
            generate_efficiency_recommendations(&readings, &anomalies, &self.config.efficiency);

        Ok(Some(EnergyAnalysis {
            reading_count: readings.len(),
            total_kwh: values.iter().sum(),
            average_kwh: mean(&values).unwrap_or_default(),
            peak_kwh: peak.map(|r| r.kwh).unwrap_or_default(),
            peak_at: peak.map(|r| r.timestamp),
            trend_percent: calculate_consumption_trend(&values),
            buckets: bucket(&readings, windows),
            anomalies,
            recommendations,
        }))
    }

    /// Indoor climate averages, comfort score and temperature trend of a room
    pub async fn analyze_environment(
        &self,
        room_id: RoomId,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> AnalysisResult<EnvironmentalAnalysis> {
        let subject_id = room_id.to_string();
        info!(room_id = %room_id, "🌡️ Environmental analysis started");
        let outcome = self
            .environment_analysis(&subject_id, range, interval, cancel)
            .await;
        self.finish(
            "environment",
            &subject_id,
            range,
            outcome,
            "No environmental data available for the period",
        )
    }

    async fn environment_analysis(
        &self,
        subject_id: &str,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Outcome<EnvironmentalAnalysis> {
        validate_interval(range.start(), range.end(), interval)?;
        let readings = self
            .collect(
                cancel,
                self.source.environmental_readings(subject_id, range, interval),
            )
            .await?;
        if readings.is_empty() {
            return Ok(None);
        }

        let temperatures: Vec<f64> = readings
            .iter()
            .map(|r| r.conditions.temperature().as_celsius())
            .collect();

        Ok(Some(EnvironmentalAnalysis {
            reading_count: readings.len(),
            average_temperature_c: mean(&temperatures).unwrap_or_default(),
            average_humidity: average_of(&readings, |c| c.humidity()),
            average_co2_ppm: average_of(&readings, |c| c.co2_ppm()),
            average_light_lux: average_of(&readings, |c| c.light_lux()),
            comfort_score: comfort_score(&readings, &self.config.comfort).unwrap_or_default(),
            temperature_trend_percent: calculate_consumption_trend(&temperatures),
        }))
    }

    /// Efficiency, health and maintenance needs of one piece of equipment
    pub async fn analyze_equipment(
        &self,
        equipment: &Equipment,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> AnalysisResult<EquipmentAnalysis> {
        let subject_id = equipment.id().to_string();
        info!(
            equipment_id = %equipment.id(),
            name = equipment.name(),
            "🔧 Equipment analysis started"
        );
        let outcome = self
            .equipment_analysis(equipment, range, interval, cancel)
            .await;
        self.finish(
            "equipment",
            &subject_id,
            range,
            outcome,
            "No operational data available for the period",
        )
    }

    async fn equipment_analysis(
        &self,
        equipment: &Equipment,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Outcome<EquipmentAnalysis> {
        validate_interval(range.start(), range.end(), interval)?;
        let subject_id = equipment.id().to_string();
        let readings = self
            .collect(
                cancel,
                self.source.operational_readings(&subject_id, range, interval),
            )
            .await?;
        if readings.is_empty() {
            return Ok(None);
        }

        let efficiency: Vec<f64> = readings.iter().map(|r| r.metrics.efficiency()).collect();
        let average_efficiency = mean(&efficiency).unwrap_or_default();
        let recommendations =
            generate_maintenance_recommendations(equipment, &readings, Utc::now());

        let status_factor = match equipment.status() {
            EquipmentStatus::Operational => 1.0,
            EquipmentStatus::Maintenance | EquipmentStatus::Offline => 0.5,
            EquipmentStatus::Failed | EquipmentStatus::Decommissioned => 0.0,
        };
        let urgent = recommendations
            .iter()
            .filter(|r| r.priority >= MaintenancePriority::High)
            .count();
        let health_score =
            (average_efficiency * status_factor - 10.0 * urgent as f64).clamp(0.0, 100.0);

        Ok(Some(EquipmentAnalysis {
            equipment_id: Some(equipment.id()),
            status: Some(equipment.status()),
            reading_count: readings.len(),
            average_efficiency,
            total_energy_kwh: readings.iter().map(|r| r.metrics.energy_consumed_kwh()).sum(),
            uptime_hours: readings
                .iter()
                .map(|r| r.metrics.uptime_hours())
                .fold(0.0, f64::max),
            health_score,
            recommendations,
        }))
    }

    /// Outliers in a consumption series, with the statistics used to find them
    pub async fn detect_anomalies(
        &self,
        subject_id: &str,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> AnalysisResult<AnomalyReport> {
        info!(subject_id, "🔎 Anomaly detection started");
        let outcome = self.anomaly_report(subject_id, range, interval, cancel).await;
        self.finish(
            "anomalies",
            subject_id,
            range,
            outcome,
            "No energy data available for the period",
        )
    }

    async fn anomaly_report(
        &self,
        subject_id: &str,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Outcome<AnomalyReport> {
        validate_interval(range.start(), range.end(), interval)?;
        let readings = self
            .collect(cancel, self.source.energy_readings(subject_id, range, interval))
            .await?;
        if readings.is_empty() {
            return Ok(None);
        }

        let values: Vec<f64> = readings.iter().map(|r| r.kwh).collect();
        Ok(Some(AnomalyReport {
            reading_count: readings.len(),
            mean_kwh: mean(&values).unwrap_or_default(),
            std_dev_kwh: std_dev(&values).unwrap_or_default(),
            threshold: self.config.anomaly.threshold,
            anomalies: detect_consumption_anomalies(&readings, &self.config.anomaly),
        }))
    }

    /// Compute the named KPIs for a building; an empty list means the configured defaults
    pub async fn calculate_kpis(
        &self,
        building: &Building,
        kpi_names: &[&str],
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> AnalysisResult<KpiReport> {
        let subject_id = building.id().to_string();
        info!(
            building_id = %building.id(),
            requested = kpi_names.len(),
            "📈 KPI calculation started"
        );
        let outcome = self
            .kpi_report(building, kpi_names, range, interval, cancel)
            .await;
        self.finish("kpis", &subject_id, range, outcome, "No KPI data available")
    }

    async fn kpi_report(
        &self,
        building: &Building,
        kpi_names: &[&str],
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Outcome<KpiReport> {
        validate_interval(range.start(), range.end(), interval)?;
        let entity_id = building.id().to_string();
        let (energy, environment) = self
            .collect(cancel, async {
                tokio::try_join!(
                    self.source.energy_readings(&entity_id, range, interval),
                    self.source
                        .environmental_readings(&entity_id, range, interval),
                )
            })
            .await?;

        let names: Vec<&str> = if kpi_names.is_empty() {
            self.config.kpis.iter().map(String::as_str).collect()
        } else {
            kpi_names.to_vec()
        };
        let context = KpiContext {
            building,
            energy: &energy,
            environment: &environment,
            window: range,
            interval,
            comfort: &self.config.comfort,
            now: Utc::now(),
        };

        let report = self.kpis.calculate(&names, &context);
        if !report.unknown_kpis.is_empty() {
            warn!(unknown = ?report.unknown_kpis, "Unknown KPIs requested");
        }
        Ok(Some(report))
    }

    /// Run every insight generator and return their findings, most urgent first
    pub async fn generate_insights(
        &self,
        building: &Building,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> AnalysisResult<InsightReport> {
        let subject_id = building.id().to_string();
        info!(building_id = %building.id(), "💡 Insight generation started");
        let outcome = self.insight_report(building, range, interval, cancel).await;
        self.finish("insights", &subject_id, range, outcome, "No insight data available")
    }

    async fn insight_report(
        &self,
        building: &Building,
        range: TimeRange,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Outcome<InsightReport> {
        validate_interval(range.start(), range.end(), interval)?;
        let entity_id = building.id().to_string();
        let (energy, environment) = self
            .collect(cancel, async {
                tokio::try_join!(
                    self.source.energy_readings(&entity_id, range, interval),
                    self.source
                        .environmental_readings(&entity_id, range, interval),
                )
            })
            .await?;

        let anomalies = detect_consumption_anomalies(&energy, &self.config.anomaly);
        let context = InsightContext {
            building,
            energy: &energy,
            anomalies: &anomalies,
            environment: &environment,
            comfort: &self.config.comfort,
            now: Utc::now(),
        };

        let insights = self
            .generators
            .iter()
            .flat_map(|generator| {
                let found = generator.generate(&context);
                debug!(category = ?generator.category(), count = found.len(), "Insights generated");
                found
            })
            .collect();

        Ok(Some(InsightReport {
            insights: prioritize(insights),
        }))
    }
}

fn average_of(
    readings: &[EnvironmentalReading],
    field: impl Fn(&EnvironmentalConditions) -> f64,
) -> f64 {
    let values: Vec<f64> = readings.iter().map(|r| field(&r.conditions)).collect();
    mean(&values).unwrap_or_default()
}

/// Sum readings into their aggregation windows
///
/// Expects `readings` sorted by timestamp, as every `ReadingSource` returns
/// them; a single pass walks windows and readings together.
fn bucket(readings: &[EnergyReading], windows: TimeWindows) -> Vec<EnergyBucket> {
    let mut remaining = readings;
    windows
        .map(|window| {
            let skipped = remaining
                .iter()
                .take_while(|r| r.timestamp < window.start())
                .count();
            remaining = &remaining[skipped..];
            let inside = remaining
                .iter()
                .take_while(|r| r.timestamp < window.end())
                .count();
            let (current, rest) = remaining.split_at(inside);
            remaining = rest;
            EnergyBucket {
                window,
                kwh: current.iter().map(|r| r.kwh).sum(),
                reading_count: current.len(),
            }
        })
        .collect()
}
