use async_trait::async_trait;
use chrono::{DateTime, Duration, Timelike, Utc};
use domain::telemetry::{
    CollectionError, EnergyReading, EnvironmentalReading, OperationalReading, ReadingSource,
    TimeRange,
};
use domain::value::{EnvironmentalConditions, EquipmentMetrics, Temperature};
use serde::{Deserialize, Serialize};

/// Shape of the simulated daily load curve
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatorConfig {
    /// Mean consumption per bucket
    pub base_kwh: f64,
    /// Peak deviation from the mean over a day
    pub amplitude_kwh: f64,
    /// Hour of day at which consumption peaks
    pub peak_hour: u32,
    pub base_temperature_c: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            base_kwh: 80.0,
            amplitude_kwh: 30.0,
            peak_hour: 14,
            base_temperature_c: 22.0,
        }
    }
}

/// Deterministic reading source following a sine-shaped daily cycle
///
/// Emits one reading at the start of every `interval` bucket of the range.
/// Useful for demos and soak runs where no telemetry store is available.
pub struct SimulatedReadingSource {
    config: SimulatorConfig,
}

impl SimulatedReadingSource {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Position in the daily cycle, 1.0 at the peak hour and -1.0 twelve hours later
    fn daily_phase(&self, at: DateTime<Utc>) -> f64 {
        let hours = at.hour() as f64 + at.minute() as f64 / 60.0;
        let offset = hours - self.config.peak_hour as f64;
        (offset / 24.0 * 2.0 * std::f64::consts::PI).cos()
    }

    fn bucket_starts(
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<DateTime<Utc>>, CollectionError> {
        if interval <= Duration::zero() {
            return Err(CollectionError::InvalidRequest(format!(
                "interval must be positive, got {interval}"
            )));
        }
        let mut starts = Vec::new();
        let mut cursor = range.start();
        while cursor < range.end() {
            starts.push(cursor);
            match cursor.checked_add_signed(interval) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        Ok(starts)
    }

    fn round(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }
}

#[async_trait]
impl ReadingSource for SimulatedReadingSource {
    async fn energy_readings(
        &self,
        _entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<EnergyReading>, CollectionError> {
        Ok(Self::bucket_starts(range, interval)?
            .into_iter()
            .map(|at| {
                let kwh = self.config.base_kwh + self.config.amplitude_kwh * self.daily_phase(at);
                EnergyReading::new(at, Self::round(kwh.max(0.0)))
            })
            .collect())
    }

    async fn environmental_readings(
        &self,
        _entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<EnvironmentalReading>, CollectionError> {
        Self::bucket_starts(range, interval)?
            .into_iter()
            .map(|at| {
                let phase = self.daily_phase(at);
                let temperature = Temperature::celsius(self.config.base_temperature_c + 1.5 * phase)
                    .map_err(|e| CollectionError::InvalidRequest(e.to_string()))?;
                let conditions = EnvironmentalConditions::new(
                    temperature,
                    Self::round(45.0 + 5.0 * phase),
                    Self::round(650.0 + 250.0 * phase),
                    Self::round(400.0 + 200.0 * phase),
                    at,
                )
                .map_err(|e| CollectionError::InvalidRequest(e.to_string()))?;
                Ok(EnvironmentalReading {
                    timestamp: at,
                    conditions,
                })
            })
            .collect()
    }

    async fn operational_readings(
        &self,
        _entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<OperationalReading>, CollectionError> {
        let hours_per_bucket = interval.num_seconds() as f64 / 3600.0;
        Self::bucket_starts(range, interval)?
            .into_iter()
            .enumerate()
            .map(|(index, at)| {
                let load = (self.config.base_kwh + self.config.amplitude_kwh * self.daily_phase(at))
                    .max(0.0);
                let metrics = EquipmentMetrics::new(
                    Self::round(88.0 - 4.0 * self.daily_phase(at)),
                    Self::round(hours_per_bucket * (index + 1) as f64),
                    Self::round(load),
                )
                .map_err(|e| CollectionError::InvalidRequest(e.to_string()))?;
                Ok(OperationalReading {
                    timestamp: at,
                    metrics,
                })
            })
            .collect()
    }
}
