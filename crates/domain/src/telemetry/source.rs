use async_trait::async_trait;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{EnergyReading, EnvironmentalReading, OperationalReading, TimeRange};

/// Failure reported by a reading source
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollectionError {
    #[error("Reading source unavailable: {0}")]
    Unavailable(String),

    #[error("Reading source timed out after {0} ms")]
    Timeout(u64),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Invalid collection request: {0}")]
    InvalidRequest(String),
}

/// Supplier of time-ordered readings, one per `interval` bucket of `range`
///
/// Implementations live outside the domain (telemetry store, simulator).
/// An empty vector means "no data for this period" and is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadingSource: Send + Sync {
    async fn energy_readings(
        &self,
        entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<EnergyReading>, CollectionError>;

    async fn environmental_readings(
        &self,
        entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<EnvironmentalReading>, CollectionError>;

    async fn operational_readings(
        &self,
        entity_id: &str,
        range: TimeRange,
        interval: Duration,
    ) -> Result<Vec<OperationalReading>, CollectionError>;
}
