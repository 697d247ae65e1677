use async_trait::async_trait;
use chrono::Duration;
use domain::telemetry::{
    CollectionError, EnergyReading, EnvironmentalReading, OperationalReading, ReadingSource,
    TimeRange,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Reading source backed by series loaded ahead of time
///
/// Readings are returned sorted by timestamp and filtered to the requested
/// range; the interval is not used to resample.
#[derive(Default)]
pub struct InMemoryReadingSource {
    energy: RwLock<HashMap<String, Vec<EnergyReading>>>,
    environment: RwLock<HashMap<String, Vec<EnvironmentalReading>>>,
    operations: RwLock<HashMap<String, Vec<OperationalReading>>>,
}

impl InMemoryReadingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_energy(&self, entity_id: impl Into<String>, readings: Vec<EnergyReading>) {
        self.energy
            .write()
            .await
            .entry(entity_id.into())
            .or_default()
            .extend(readings);
    }

    pub async fn insert_environment(
        &self,
        entity_id: impl Into<String>,
        readings: Vec<EnvironmentalReading>,
    ) {
        self.environment
            .write()
            .await
            .entry(entity_id.into())
            .or_default()
            .extend(readings);
    }

    pub async fn insert_operations(
        &self,
        entity_id: impl Into<String>,
        readings: Vec<OperationalReading>,
    ) {
        self.operations
            .write()
            .await
            .entry(entity_id.into())
            .or_default()
            .extend(readings);
    }
}

fn check_interval(interval: Duration) -> Result<(), CollectionError> {
    if interval <= Duration::zero() {
        return Err(CollectionError::InvalidRequest(format!(
            "interval must be positive, got {interval}"
        )));
    }
    Ok(())
}

fn select<T: Clone>(
    series: Option<&Vec<T>>,
    range: TimeRange,
    timestamp: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut selected: Vec<T> = series
        .map(|readings| {
            readings
                .iter()
                .filter(|r| range.contains(timestamp(r)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    selected.sort_by_key(|r| timestamp(r));
    selected
}

#[async_trait]
impl ReadingSource for InMemoryReadingSource {
    async fn energy_readings(
        &self,
        entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<EnergyReading>, CollectionError> {
        check_interval(interval)?;
        let guard = self.energy.read().await;
        let readings = select(guard.get(entity_id), range, |r| r.timestamp);
        debug!(entity_id, count = readings.len(), "Energy readings served");
        Ok(readings)
    }

    async fn environmental_readings(
        &self,
        entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<EnvironmentalReading>, CollectionError> {
        check_interval(interval)?;
        let guard = self.environment.read().await;
        Ok(select(guard.get(entity_id), range, |r| r.timestamp))
    }

    async fn operational_readings(
        &self,
        entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<OperationalReading>, CollectionError> {
        check_interval(interval)?;
        let guard = self.operations.read().await;
        Ok(select(guard.get(entity_id), range, |r| r.timestamp))
    }
}
